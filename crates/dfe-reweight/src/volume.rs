/// Returns `ln(V_ref / V_sim)` for cubic boxes, i.e. `3 ln(ref_side / sim_side)`.
///
/// Adding this to a raw ΔF/kT rescales the state-B population from the simulated
/// volume to the reference volume. Both sides must be positive; the configuration
/// layer rejects anything else.
pub fn volume_correction(reference_side: f64, simulation_side: f64) -> f64 {
    3.0 * (reference_side / simulation_side).ln()
}
