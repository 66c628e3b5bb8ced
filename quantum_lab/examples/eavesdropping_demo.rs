use quantum_lab::attack::{estimate_grover, estimate_shor};
use quantum_lab::{simulate_attack, SeededBitSource};

fn simulate_eavesdropping() -> quantum_lab::Result<()> {
    println!("Attack Simulation");

    let mut source = SeededBitSource::from_entropy();
    for name in ["intercept-resend", "photon-number-splitting", "man-in-the-middle", "tempest"] {
        let outcome = simulate_attack(name, &mut source, false);
        println!(
            "{:<24} success {:>6.2}%  detection {:>6.2}%  {}",
            outcome.protocol_name,
            outcome.success_rate_percent,
            outcome.detection_rate_percent,
            outcome.description
        );
    }

    let shor = estimate_shor(2048)?;
    println!(
        "Shor vs {}: {} qubits, ~{:.1}s, p={}",
        shor.target, shor.qubits_required, shor.estimated_seconds, shor.success_probability
    );
    let grover = estimate_grover(1_000_000)?;
    println!(
        "Grover over {} items: {} qubits, {} iterations",
        grover.search_space, grover.qubits_required, grover.iterations
    );
    Ok(())
}

fn main() -> quantum_lab::Result<()> {
    simulate_eavesdropping()
}
