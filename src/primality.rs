use num_bigint::BigUint;
use num_traits::{One, Zero};

// Deterministic witness set: exact for all candidates below 3.3 * 10^24,
// a strong probabilistic check beyond that.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin primality test with small-prime trial division up front.
pub(crate) fn is_prime(candidate: &BigUint) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    if candidate < &two {
        return false;
    }
    for witness in WITNESSES {
        let witness = BigUint::from(witness);
        if candidate == &witness {
            return true;
        }
        if (candidate % &witness).is_zero() {
            return false;
        }
    }

    // candidate - 1 = d * 2^s with d odd
    let candidate_minus_one = candidate - &one;
    // NOTE candidate is odd and > 37 here, so candidate - 1 is even
    let s = candidate_minus_one.trailing_zeros().unwrap_or(1);
    let d = &candidate_minus_one >> s;

    'witness: for witness in WITNESSES {
        let mut x = BigUint::from(witness).modpow(&d, candidate);
        if x.is_one() || x == candidate_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % candidate;
            if x == candidate_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
