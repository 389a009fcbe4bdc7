//! Fuzz harness for the merge path.
//!
//! Model: three agents each own a replica. They edit locally and
//! periodically broadcast their state to a peer. After every broadcast the
//! receiver must satisfy the structural invariants, and a full mesh sync
//! must leave all replicas with identical content.
//!
//! Edits are insert-only: deletion is local to a replica and does not
//! travel through a merge, so deleted content would diverge by design.
//!
//! Seeds are deterministic; a failing seed is printed before the panic so
//! the run can be replayed.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use weft::crdt::algorithms;
use weft::crdt::profiling;
use weft::crdt::Algorithm;
use weft::crdt::Doc;

const NUM_AGENTS: usize = 3;
const ROUNDS_PER_SEED: usize = 300;

const NAMES: [&str; NUM_AGENTS] = ["alice", "bob", "carol"];

fn run_seed(alg: &dyn Algorithm, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut replicas: Vec<Doc> = (0..NUM_AGENTS).map(|_| Doc::new()).collect();

    for _ in 0..ROUNDS_PER_SEED {
        if rng.gen_range(0..8) < 7 {
            // Local insert at a random position.
            let who = rng.gen_range(0..NUM_AGENTS);
            let doc = &mut replicas[who];
            let agent = doc.agent(NAMES[who]);
            let pos = rng.gen_range(0..=doc.len());
            let ch = (b'a' + rng.gen_range(0..26)) as char;
            alg.local_insert(doc, agent, pos, ch)
                .unwrap_or_else(|err| panic!("seed {}: local insert failed: {}", seed, err));
        } else {
            // Broadcast to a random peer.
            let from = rng.gen_range(0..NUM_AGENTS);
            let to = (from + rng.gen_range(1..NUM_AGENTS)) % NUM_AGENTS;
            let src = replicas[from].clone();
            alg.merge_into(&mut replicas[to], &src)
                .unwrap_or_else(|err| panic!("seed {}: merge failed: {}", seed, err));
            replicas[to].check_invariants();
        }
    }

    // Full mesh sync, then everyone must agree.
    for i in 0..NUM_AGENTS {
        for j in 0..NUM_AGENTS {
            if i != j {
                let src = replicas[j].clone();
                alg.merge_into(&mut replicas[i], &src)
                    .unwrap_or_else(|err| panic!("seed {}: final merge failed: {}", seed, err));
            }
        }
    }

    let first = replicas[0].content();
    for (i, replica) in replicas.iter().enumerate().skip(1) {
        assert_eq!(
            replica.content(),
            first,
            "seed {}: replica {} diverged after full sync",
            seed,
            i
        );
        replica.check_invariants();
    }
}

fn main() {
    let start: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    println!("fuzzing from seed {} (ctrl-c to stop)", start);
    for seed in start.. {
        for alg in algorithms() {
            run_seed(alg, seed);
        }
        if seed % 50 == 0 {
            println!("seed {} ok ({})", seed, profiling::report());
        }
    }
}
