use super::HasherExtensions;
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutput};
use crate::Hash;
use crypto_hashes::{Hasher, HasherBase, TransactionHash, TransactionID};

/// Returns the transaction hash. Note that this is different from the transaction ID.
pub fn hash(tx: &Transaction) -> Hash {
    let mut hasher = TransactionHash::new();
    write_transaction(&mut hasher, tx, true);
    hasher.finalize()
}

/// Returns the transaction ID, which excludes signature scripts
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = TransactionID::new();
    write_transaction(&mut hasher, tx, false);
    hasher.finalize()
}

fn write_transaction<T: Hasher>(hasher: &mut T, tx: &Transaction, include_signature_scripts: bool) {
    hasher.write_u16(tx.version).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input, include_signature_scripts);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }

    hasher.write_u64(tx.lock_time).update(tx.subnetwork_id).write_u64(tx.gas).write_var_bytes(&tx.payload);
}

#[inline(always)]
fn write_input<T: Hasher>(hasher: &mut T, input: &TransactionInput, include_signature_script: bool) {
    hasher.update(input.previous_outpoint.transaction_id).write_u32(input.previous_outpoint.index);
    if include_signature_script {
        hasher.write_var_bytes(&input.signature_script);
    } else {
        hasher.write_var_bytes(&[]);
    }
    hasher.write_u64(input.sequence).write_u8(input.sig_op_count);
}

#[inline(always)]
fn write_output<T: Hasher>(hasher: &mut T, output: &TransactionOutput) {
    hasher
        .write_u64(output.value)
        .write_u16(output.script_public_key.version())
        .write_var_bytes(output.script_public_key.script());
}
