// SPDX-License-Identifier: MIT

//! Fallback entropy for boards without random number hardware.
//!
//! Randomness is taken from the timing jitter of an analog input that
//! is left floating (or wired to a noise source). For every bit, the
//! input is sampled once for a baseline and then re-sampled until the
//! reading changes. The parity of the number of unchanged re-samples
//! becomes the bit; if the very first re-sample already differs, the
//! parity of the baseline reading is used instead. Bits are shifted in
//! most significant first.
//!
//! # Caveats
//!
//! This is a low-quality, unconditioned source. Its output is not
//! whitened or hashed here and should be passed through a
//! cryptographic hash (SHA-256 or similar) before being used as key
//! material. For that reason [`JitterEntropy`] does not implement
//! [`CryptoEntropy`](crate::entropy::CryptoEntropy).
//!
//! There is no timeout: each bit waits until the reading changes. A
//! static input stalls the request indefinitely, and the latency of a
//! live input depends on the electrical environment.
use crate::{driver::AnalogSource, entropy::EntropyProvider, error::Error};

/// Analog-jitter entropy extractor.
///
/// # Example
///
/// ```
/// use hwtrust::{entropy::EntropyProvider, jitter::JitterEntropy};
///
/// # fn main() -> Result<(), hwtrust::error::Error> {
/// // Stands in for an ADC channel read.
/// let mut reading = 0u16;
/// let mut rng = JitterEntropy::new(move || {
///     reading = reading.wrapping_mul(31).wrapping_add(7) % 5;
///     reading
/// });
/// let mut seed = [0u8; 16];
/// rng.fill_random(&mut seed)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JitterEntropy<A> {
    adc: A,
}

impl<A> JitterEntropy<A>
where
    A: AnalogSource,
{
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn free(self) -> A {
        self.adc
    }

    fn next_bit(&mut self) -> u8 {
        let baseline = self.adc.sample();
        if self.adc.sample() != baseline {
            return (baseline & 1) as u8;
        }
        // Only the parity of the unchanged re-samples is kept.
        let mut odd = true;
        while self.adc.sample() == baseline {
            odd = !odd;
        }
        odd as u8
    }

    fn next_byte(&mut self) -> u8 {
        (0..u8::BITS).fold(0, |acc, _| (acc << 1) | self.next_bit())
    }
}

impl<A> EntropyProvider for JitterEntropy<A>
where
    A: AnalogSource,
{
    /// Fill `bytes` one extracted byte at a time. Never fails, but may
    /// block indefinitely on a static input.
    fn fill_random(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        bytes.fill_with(|| self.next_byte());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        driver::AnalogSource, entropy::EntropyProvider, error::Error, jitter::JitterEntropy,
    };
    use std::{collections::VecDeque, vec::Vec};

    struct ScriptedAdc {
        samples: VecDeque<u16>,
        taken: usize,
    }

    impl AnalogSource for ScriptedAdc {
        fn sample(&mut self) -> u16 {
            self.taken += 1;
            self.samples.pop_front().expect("script exhausted")
        }
    }

    /// One bit per `(baseline, repeats)`: the baseline, `repeats`
    /// unchanged re-samples, then a differing one.
    fn script(bits: &[(u16, usize)]) -> ScriptedAdc {
        let mut samples = VecDeque::new();
        for &(baseline, repeats) in bits {
            samples.push_back(baseline);
            samples.extend(core::iter::repeat(baseline).take(repeats));
            samples.push_back(baseline ^ 0x100);
        }
        ScriptedAdc { samples, taken: 0 }
    }

    const BYTE_D5: [(u16, usize); 8] = [
        (5, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        (4, 0),
        (8, 5),
        (8, 6),
        (8, 7),
    ];

    #[test]
    fn scripted_byte() -> Result<(), Error> {
        let mut rng = JitterEntropy::new(script(&BYTE_D5));
        let mut buf = [0u8; 1];
        rng.fill_random(&mut buf)?;
        assert_eq!([0xd5], buf);
        let adc = rng.free();
        assert_eq!(16 + 24, adc.taken);
        assert!(adc.samples.is_empty());
        Ok(())
    }

    #[test]
    fn scripted_stream_is_deterministic() -> Result<(), Error> {
        let bits: Vec<(u16, usize)> = BYTE_D5
            .iter()
            .chain(BYTE_D5.iter().rev())
            .copied()
            .collect();
        let run = || -> Result<[u8; 2], Error> {
            let mut rng = JitterEntropy::new(script(&bits));
            let mut buf = [0u8; 2];
            rng.fill_random(&mut buf)?;
            Ok(buf)
        };
        let first = run()?;
        assert_eq!([0xd5, 0xab], first);
        assert_eq!(first, run()?);
        Ok(())
    }

    #[test]
    fn immediate_change_uses_baseline_parity() -> Result<(), Error> {
        let mut flip = false;
        let mut rng = JitterEntropy::new(move || -> u16 {
            flip = !flip;
            if flip {
                3
            } else {
                2
            }
        });
        let mut buf = [0u8; 3];
        rng.fill_random(&mut buf)?;
        assert_eq!([0xff; 3], buf);
        Ok(())
    }

    #[test]
    fn length_matches_request() -> Result<(), Error> {
        let mut reading = 0u16;
        let mut rng = JitterEntropy::new(move || {
            reading = reading.wrapping_add(1);
            reading / 3
        });
        let mut buf = [0xaau8; 9];
        rng.fill_random(&mut buf[..8])?;
        assert_eq!(0xaa, buf[8]);
        Ok(())
    }

    #[test]
    fn long_wait_uses_count_parity() -> Result<(), Error> {
        let bits = [
            (7, 1 << 20),
            (7, (1 << 20) + 1),
            (6, 2),
            (6, 3),
            (7, 0),
            (6, 0),
            (7, 4),
            (7, 5),
        ];
        let mut rng = JitterEntropy::new(script(&bits));
        let mut buf = [0u8; 1];
        rng.fill_random(&mut buf)?;
        assert_eq!([0b0101_1001], buf);
        Ok(())
    }

    #[test]
    #[ignore = "samples the input 2^32 times"]
    fn count_of_two_pow_32_is_even() -> Result<(), Error> {
        let mut taken = 0u64;
        let mut rng = JitterEntropy::new(move || -> u16 {
            taken += 1;
            // Baseline, 2^32 unchanged re-samples, a change, then even
            // readings that change on every sample.
            match taken {
                t if t <= (1 << 32) + 1 => 7,
                t if t == (1 << 32) + 2 => 8,
                t => ((t % 2) * 2) as u16,
            }
        });
        let mut buf = [0u8; 1];
        rng.fill_random(&mut buf)?;
        assert_eq!([0u8], buf);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "input still static")]
    fn static_input_never_completes() {
        let mut samples = 0u32;
        let mut rng = JitterEntropy::new(move || {
            samples += 1;
            if samples > 1_000_000 {
                panic!("input still static after {} samples", samples - 1);
            }
            512u16
        });
        let _ = rng.fill_random(&mut [0u8; 1]);
    }
}
