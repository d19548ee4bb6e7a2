//! Pi digit extraction benchmarks.
//!
//! An unbounded spigot: each step folds the next series term into the
//! `acc/den` state, and a digit is emitted once extracting at 3 and at 4
//! agree on it.

use crate::render::RenderedBlock;

/// Blocks emitted after the catalog's operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialBenchmarks {
    /// One benchmark per digit count
    pub blocks: Vec<RenderedBlock>,
    /// Helpers shared by every block, emitted once
    pub support: Option<String>,
}

impl SpecialBenchmarks {
    /// Whether there is nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One benchmark per digit count, plus the spigot itself.
///
/// No counts, no output: the helpers are only emitted when something calls them.
pub fn pi_benchmarks(digit_counts: &[u32], bigint_type: &str) -> SpecialBenchmarks {
    if digit_counts.is_empty() {
        return SpecialBenchmarks::default();
    }

    let blocks = digit_counts
        .iter()
        .map(|count| {
            let function_name = format!("pi_{count}");
            let mut body_text = String::new();
            body_text.push_str("#[divan::bench]\n");
            body_text.push_str(&format!("fn {function_name}(bencher: Bencher) {{\n"));
            body_text.push_str(&format!(
                "    bencher.bench(|| black_box(pi_digits(black_box({count}))));\n"
            ));
            body_text.push_str("}\n");
            RenderedBlock {
                function_name,
                body_text,
            }
        })
        .collect();

    SpecialBenchmarks {
        blocks,
        support: Some(SPIGOT.replace("BigInt", bigint_type)),
    }
}

const SPIGOT: &str = r#"/// The first `count` decimal digits of pi.
fn pi_digits(count: usize) -> String {
    let mut digits = String::with_capacity(count);
    let mut acc = BigInt::zero();
    let mut den = BigInt::one();
    let mut num = BigInt::one();
    let mut k = 0u32;

    while digits.len() < count {
        k += 1;
        next_term(&mut acc, &mut den, &mut num, k);
        if num > acc {
            continue;
        }

        let digit = extract_digit(&acc, &den, &num, 3);
        if digit != extract_digit(&acc, &den, &num, 4) {
            continue;
        }

        digits.push(char::from(b'0' + digit));
        eliminate_digit(&mut acc, &den, &mut num, digit);
    }

    digits
}

/// Callers only extract once `num <= acc`, which bounds the quotient to 0..=9.
fn extract_digit(acc: &BigInt, den: &BigInt, num: &BigInt, nth: u32) -> u8 {
    ((num * nth + acc) / den)
        .to_u8()
        .expect("spigot digit fits in u8")
}

fn eliminate_digit(acc: &mut BigInt, den: &BigInt, num: &mut BigInt, digit: u8) {
    *acc -= den * u32::from(digit);
    *acc *= 10u32;
    *num *= 10u32;
}

fn next_term(acc: &mut BigInt, den: &mut BigInt, num: &mut BigInt, k: u32) {
    let k2 = k * 2 + 1;
    *acc += &*num * 2u32;
    *acc *= k2;
    *den *= k2;
    *num *= k;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_counts_no_output() {
        let special = pi_benchmarks(&[], "BigInt");
        assert!(special.is_empty());
        assert_eq!(special.support, None);
    }

    #[test]
    fn one_block_per_count() {
        let special = pi_benchmarks(&[500, 1000, 5000], "BigInt");
        let names: Vec<_> = special
            .blocks
            .iter()
            .map(|b| b.function_name.as_str())
            .collect();
        assert_eq!(names, ["pi_500", "pi_1000", "pi_5000"]);

        insta::assert_snapshot!(special.blocks[0].body_text, @r"
        #[divan::bench]
        fn pi_500(bencher: Bencher) {
            bencher.bench(|| black_box(pi_digits(black_box(500))));
        }
        ");
    }

    #[test]
    fn support_uses_the_target_type() {
        let support = pi_benchmarks(&[10], "Int").support.unwrap();
        assert!(support.contains("fn pi_digits(count: usize) -> String"));
        assert!(support.contains("extract_digit(&acc, &den, &num, 3)"));
        assert!(support.contains("extract_digit(&acc, &den, &num, 4)"));
        assert!(support.contains("acc: &mut Int"));
        assert!(!support.contains("BigInt"));
        assert!(support.contains(".expect(\"spigot digit fits in u8\")"));
        assert!(!support.contains("unwrap_or"));
    }
}
