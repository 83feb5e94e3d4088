//! Classical register assembly
//!
//! A register is as wide as the highest classical bit referenced by the
//! bindings or recorded in the shot, plus one. Unwritten bits read 0 and the
//! string is printed with the highest bit first, so `"10"` means c1 = 1 and
//! c0 = 0.

use qsim_core::MeasurementBinding;

/// Register string for one shot, or `None` when nothing was measured
pub fn assemble(bindings: &[MeasurementBinding], recorded: &[(usize, u8)]) -> Option<String> {
    if recorded.is_empty() {
        return None;
    }

    let width = bindings
        .iter()
        .map(|b| b.cbit)
        .chain(recorded.iter().map(|&(cbit, _)| cbit))
        .max()
        .map_or(0, |highest| highest + 1);

    let mut bits = vec![b'0'; width];
    for &(cbit, value) in recorded {
        bits[cbit] = if value == 0 { b'0' } else { b'1' };
    }
    Some(bits.iter().rev().map(|&b| b as char).collect())
}

/// Register string for a sampled basis state
///
/// Each binding reads bit `qubit` of `basis_index`; later bindings to the
/// same classical bit overwrite earlier ones.
pub fn from_basis_index(bindings: &[MeasurementBinding], basis_index: usize) -> Option<String> {
    let recorded: Vec<(usize, u8)> = bindings
        .iter()
        .map(|b| (b.cbit, ((basis_index >> b.qubit) & 1) as u8))
        .collect();
    assemble(bindings, &recorded)
}
