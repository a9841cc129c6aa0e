const BOLTZMANN_CONSTANT: f64 = 1.380649e-23; // In J/K
const AVOGADRO_CONSTANT: f64 = 6.02214076e23; // In 1/mol

/// Molar gas constant `kB * NA` in kJ/(mol·K).
pub const GAS_CONSTANT_KJ_PER_MOL_K: f64 = BOLTZMANN_CONSTANT * AVOGADRO_CONSTANT / 1000.0;

/// Thermal energy `RT` in kJ/mol.
#[inline]
pub fn thermal_energy(temperature: f64) -> f64 {
    GAS_CONSTANT_KJ_PER_MOL_K * temperature
}

/// Boltzmann inversion `-RT ln(density)` in kJ/mol.
///
/// A zero density maps to `+inf`, which is a valid, representable free energy for an
/// unvisited bin.
#[inline]
pub fn boltzmann_inversion(density: f64, temperature: f64) -> f64 {
    -thermal_energy(temperature) * density.ln()
}
