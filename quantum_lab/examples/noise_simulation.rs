use quantum_lab::{KeyAgreementEngine, SeededBitSource};

fn simulate_noise_effect() -> quantum_lab::Result<()> {
    println!("BB84 Protocol with Noise Simulation");

    for noise_probability in [0.0, 0.05, 0.1, 0.2] {
        let engine = KeyAgreementEngine::with_noise(noise_probability)?;
        let mut source = SeededBitSource::seeded(2024);
        let result = engine.run_key_agreement(4096, &mut source)?;
        println!(
            "noise {:>4.2}: {} bits kept, QBER {:>5.2}%, {:?}",
            noise_probability,
            result.len(),
            result.error_rate_percent,
            result.security_level()
        );
    }
    Ok(())
}

fn main() -> quantum_lab::Result<()> {
    simulate_noise_effect()
}
