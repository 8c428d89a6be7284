//! Monthly block subsidy schedule of the deflationary phase.

/// Subsidy per block for each month since the deflationary phase began: the base
/// subsidy halves every twelve months, is floored at one sompi from month 331 and
/// reaches zero in the last month. Months past the end of the table use the last entry.
pub const SUBSIDY_BY_MONTH_TABLE: [u64; 426] = [
    200000000, 188774862, 178179743, 168179283, 158740105, 149830707, 141421356, 133483985, 125992104, 118920711,
    112246204, 105946309, 100000000, 94387431, 89089871, 84089641, 79370052, 74915353, 70710678, 66741992,
    62996052, 59460355, 56123102, 52973154, 50000000, 47193715, 44544935, 42044820, 39685026, 37457676,
    35355339, 33370996, 31498026, 29730177, 28061551, 26486577, 25000000, 23596857, 22272467, 21022410,
    19842513, 18728838, 17677669, 16685498, 15749013, 14865088, 14030775, 13243288, 12500000, 11798428,
    11136233, 10511205, 9921256, 9364419, 8838834, 8342749, 7874506, 7432544, 7015387, 6621644,
    6250000, 5899214, 5568116, 5255602, 4960628, 4682209, 4419417, 4171374, 3937253, 3716272,
    3507693, 3310822, 3125000, 2949607, 2784058, 2627801, 2480314, 2341104, 2209708, 2085687,
    1968626, 1858136, 1753846, 1655411, 1562500, 1474803, 1392029, 1313900, 1240157, 1170552,
    1104854, 1042843, 984313, 929068, 876923, 827705, 781250, 737401, 696014, 656950,
    620078, 585276, 552427, 521421, 492156, 464534, 438461, 413852, 390625, 368700,
    348007, 328475, 310039, 292638, 276213, 260710, 246078, 232267, 219230, 206926,
    195312, 184350, 174003, 164237, 155019, 146319, 138106, 130355, 123039, 116133,
    109615, 103463, 97656, 92175, 87001, 82118, 77509, 73159, 69053, 65177,
    61519, 58066, 54807, 51731, 48828, 46087, 43500, 41059, 38754, 36579,
    34526, 32588, 30759, 29033, 27403, 25865, 24414, 23043, 21750, 20529,
    19377, 18289, 17263, 16294, 15379, 14516, 13701, 12932, 12207, 11521,
    10875, 10264, 9688, 9144, 8631, 8147, 7689, 7258, 6850, 6466,
    6103, 5760, 5437, 5132, 4844, 4572, 4315, 4073, 3844, 3629,
    3425, 3233, 3051, 2880, 2718, 2566, 2422, 2286, 2157, 2036,
    1922, 1814, 1712, 1616, 1525, 1440, 1359, 1283, 1211, 1143,
    1078, 1018, 961, 907, 856, 808, 762, 720, 679, 641,
    605, 571, 539, 509, 480, 453, 428, 404, 381, 360,
    339, 320, 302, 285, 269, 254, 240, 226, 214, 202,
    190, 180, 169, 160, 151, 142, 134, 127, 120, 113,
    107, 101, 95, 90, 84, 80, 75, 71, 67, 63,
    60, 56, 53, 50, 47, 45, 42, 40, 37, 35,
    33, 31, 30, 28, 26, 25, 23, 22, 21, 20,
    18, 17, 16, 15, 15, 14, 13, 12, 11, 11,
    10, 10, 9, 8, 8, 7, 7, 7, 6, 6,
    5, 5, 5, 5, 4, 4, 4, 3, 3, 3,
    3, 3, 2, 2, 2, 2, 2, 2, 2, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 0,
];

/// Table lookup, clamped to the last entry
pub fn subsidy_by_month(month: u64) -> u64 {
    let last = SUBSIDY_BY_MONTH_TABLE.len() - 1;
    let index = usize::try_from(month).map_or(last, |month| month.min(last));
    SUBSIDY_BY_MONTH_TABLE[index]
}

/// Closed-form subsidy the table was generated from: `base / 2^(month / 12)`, truncated
pub fn calc_deflationary_period_block_subsidy_float(base_subsidy: u64, month: u64) -> u64 {
    let subsidy = base_subsidy as f64 / 2f64.powf(month as f64 / 12.0);
    subsidy as u64
}
