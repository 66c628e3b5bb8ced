use quantum_lab::{Basis, SeededBitSource};

fn basis_selection_demo() {
    println!("BB84 Basis Selection Demonstration");

    let mut source = SeededBitSource::from_entropy();

    let sender_bases: Vec<Basis> = (0..10).map(|_| Basis::random(&mut source)).collect();
    println!("Sender bases: {:?}", sender_bases);

    let receiver_bases: Vec<Basis> = (0..10).map(|_| Basis::random(&mut source)).collect();
    println!("Receiver bases: {:?}", receiver_bases);

    let matching_bases_count = sender_bases
        .iter()
        .zip(receiver_bases.iter())
        .filter(|&(a, b)| a == b)
        .count();

    println!("Number of matching bases: {}", matching_bases_count);
}

fn main() {
    basis_selection_demo();
}
