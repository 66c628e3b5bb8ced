use quantum_lab::{
    bb84::bits_to_binary, run_key_agreement, BitSource, QubitEvent, SeededBitSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = 42;
    let n = 16;

    // Step through the rounds by hand first
    let mut source = SeededBitSource::seeded(seed);
    let events: Vec<QubitEvent> = (0..n).map(|_| QubitEvent::run(&mut source, 0.0)).collect();
    for (i, event) in events.iter().enumerate() {
        println!(
            "round {:>2}: sent {} in {:?}, read in {:?} -> {} {}",
            i,
            event.sender_bit as u8,
            event.sender_basis,
            event.receiver_basis,
            event.measured_bit as u8,
            if event.bases_match() { "(kept)" } else { "" }
        );
    }

    // The engine over the same seed sifts the same bits
    let result = run_key_agreement(n, &mut SeededBitSource::seeded(seed))?;
    println!("Shared key: {}", bits_to_binary(&result.retained_bits));
    println!("Key hex:    {}", result.key_hex());
    println!("QBER:       {:.2}%", result.error_rate_percent);
    println!("Efficiency: {:.2}", result.efficiency());

    let mut fresh = SeededBitSource::from_entropy();
    println!("One more fair coin: {}", fresh.next_bit());
    Ok(())
}
