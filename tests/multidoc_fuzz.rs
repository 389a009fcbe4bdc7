//! Multi-document fuzz: three replicas, random edits, pairwise syncs.
//!
//! After every pairwise sync (merge both directions) the two replicas must
//! hold identical content and satisfy the structural invariants. Edits are
//! insert-only: deletion does not travel through a merge, so deleted
//! content diverges by design and is tested separately.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use weft::crdt::Algorithm;
use weft::crdt::Automerge;
use weft::crdt::Doc;
use weft::crdt::Sync9;
use weft::crdt::Yjs;
use weft::crdt::YjsMod;

const NAMES: [&str; 3] = ["A", "B", "C"];

fn run(alg: &dyn Algorithm, seed: u64, rounds: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut docs: Vec<Doc> = (0..3).map(|_| Doc::new()).collect();

    for round in 0..rounds {
        if rng.gen_range(0..10) < 8 {
            // Random local insert on a random replica.
            let who = rng.gen_range(0..3);
            let doc = &mut docs[who];
            let agent = doc.agent(NAMES[who]);
            let pos = rng.gen_range(0..=doc.len());
            let ch = (b'a' + rng.gen_range(0..26)) as char;
            alg.local_insert(doc, agent, pos, ch)
                .unwrap_or_else(|err| panic!("{}: round {}: insert failed: {}", alg.name(), round, err));
        } else {
            // Pairwise sync.
            let i = rng.gen_range(0..3);
            let j = (i + rng.gen_range(1..3)) % 3;

            let src = docs[j].clone();
            alg.merge_into(&mut docs[i], &src)
                .unwrap_or_else(|err| panic!("{}: round {}: merge failed: {}", alg.name(), round, err));
            let back = docs[i].clone();
            alg.merge_into(&mut docs[j], &back)
                .unwrap_or_else(|err| panic!("{}: round {}: merge failed: {}", alg.name(), round, err));

            assert_eq!(
                docs[i].content(),
                docs[j].content(),
                "{}: replicas diverged after sync in round {}",
                alg.name(),
                round
            );
            docs[i].check_invariants();
            docs[j].check_invariants();
        }
    }

    // Everyone syncs with everyone; all three must agree.
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                let src = docs[j].clone();
                alg.merge_into(&mut docs[i], &src).unwrap();
            }
        }
    }
    assert_eq!(docs[0].content(), docs[1].content());
    assert_eq!(docs[1].content(), docs[2].content());
}

#[test]
fn yjs_converges() {
    run(&Yjs, 7, 1000);
}

#[test]
fn yjs_mod_converges() {
    run(&YjsMod, 7, 1000);
}

#[test]
fn automerge_converges() {
    run(&Automerge, 7, 1000);
}

#[test]
fn sync9_converges() {
    run(&Sync9, 7, 1000);
}
