//! Plain-text rendering of calculation results.

use calc_core::calculations::date::DateResult;
use calc_core::calculations::scientific::{format_fixed, format_number};
use calc_core::calculations::CalculationOutput;
use calc_core::cache_policy::CachePolicy;
use calc_core::catalog::{CalculatorKind, Section};

/// Render a result for the terminal. `decimals` rounds derived values.
pub fn render(output: &CalculationOutput, decimals: usize) -> String {
    let fixed = |v: f64| format_fixed(v, decimals);
    match output {
        CalculationOutput::Scientific(r) => format!("{} = {}", r.expression, r.display),
        CalculationOutput::Percentage(r) => r.summary.clone(),
        CalculationOutput::Fraction(r) => {
            let mut text = format!("{}\nDecimal: {}", r.expression, format_number(r.decimal));
            if r.mixed != r.result.to_string() {
                text.push_str(&format!("\nMixed:   {}", r.mixed));
            }
            text
        }
        CalculationOutput::Age(r) => format!(
            "{} years, {} months, {} days\nTotal days: {}",
            r.years, r.months, r.days, r.total_days
        ),
        CalculationOutput::Date(DateResult::Difference {
            days,
            weeks,
            remaining_days,
        }) => format!("{} days ({} weeks, {} days)", days, weeks, remaining_days),
        CalculationOutput::Date(DateResult::AddDays { date, formatted }) => {
            format!("{} ({})", formatted, date)
        }
        CalculationOutput::Time(r) => format!("{} ({} minutes)", r, r.total_minutes),
        CalculationOutput::Hours(r) => {
            let mut text = format!("{}h {}m ({} hours)", r.hours, r.minutes, fixed(r.decimal_hours));
            if r.overnight {
                text.push_str("\nShift crosses midnight");
            }
            text
        }
        CalculationOutput::Gpa(r) => format!(
            "GPA: {:.2}\nCredits: {}\nCourses counted: {} (skipped {})",
            r.gpa,
            format_number(r.total_credits),
            r.counted_courses,
            r.skipped_courses
        ),
        CalculationOutput::Grade(r) => format!(
            "{}% ({})\n{} / {} points across {} assignments",
            fixed(r.percentage),
            r.letter.label(),
            format_number(r.total_score),
            format_number(r.total_max),
            r.counted_assignments
        ),
        CalculationOutput::Triangle(r) => {
            let mut text = format!(
                "{} triangle\nArea:      {}\nPerimeter: {}\nAngles:    {}°, {}°, {}°",
                r.kind.display_name(),
                fixed(r.area),
                fixed(r.perimeter),
                fixed(r.angle_a_deg),
                fixed(r.angle_b_deg),
                fixed(r.angle_c_deg)
            );
            if r.is_right {
                text.push_str("\nRight triangle");
            }
            text
        }
        CalculationOutput::Subnet(r) => {
            let range = match (r.first_host, r.last_host) {
                (Some(first), Some(last)) => format!("{} - {}", first, last),
                _ => "none".to_string(),
            };
            format!(
                "Network:    {}/{}\nBroadcast:  {}\nMask:       {}\nWildcard:   {}\nHost range: {}\nAddresses:  {} ({} usable)",
                r.network, r.prefix, r.broadcast, r.mask, r.wildcard, range, r.total_addresses, r.usable_hosts
            )
        }
        CalculationOutput::Password(r) => format!(
            "{}\n({} characters from a set of {}, ~{} bits)",
            r.password,
            r.password.chars().count(),
            r.charset_size,
            r.entropy_bits.round()
        ),
        CalculationOutput::Random(r) => r
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        CalculationOutput::Statistics(r) => {
            let mut text = format!(
                "Count:    {}\nSum:      {}\nMean:     {}\nMin/Max:  {} / {}\nVariance: {}\nStd dev:  {}",
                r.count,
                format_number(r.sum),
                fixed(r.mean),
                format_number(r.min),
                format_number(r.max),
                fixed(r.variance),
                fixed(r.std_dev)
            );
            if let (Some(var), Some(sd)) = (r.sample_variance, r.sample_std_dev) {
                text.push_str(&format!("\nSample variance: {}\nSample std dev:  {}", fixed(var), fixed(sd)));
            }
            text
        }
        CalculationOutput::Concrete(r) => format!(
            "Volume: {} {}\nBags (80 lb): {}",
            fixed(r.volume),
            r.unit.volume_label(),
            r.bags
        ),
        CalculationOutput::Conversion(r) => r.summary.clone(),
    }
}

/// Catalog listing, grouped by section
pub fn render_catalog() -> String {
    let mut lines = Vec::new();
    for section in [Section::Math, Section::Other] {
        lines.push(section.title().to_string());
        for kind in CalculatorKind::ALL.iter().filter(|k| k.section() == section) {
            lines.push(format!("  {:<32} {}", kind.slug(), kind.description()));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

pub fn render_cache_policy(policy: CachePolicy) -> String {
    let mut text = format!("Cache-Control: {}", policy.cache_control());
    if policy.strips_conditional_headers() {
        text.push_str("\nRemoved: ETag, Last-Modified");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::{evaluate, CalculationInput};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(json: &str) -> String {
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        render(&evaluate(&input, &mut StdRng::seed_from_u64(5)).unwrap(), 2)
    }

    #[test]
    fn test_render_subnet() {
        let text = run(r#"{"calculator":"subnet","address":"192.168.1.77","prefix":24}"#);
        assert!(text.contains("Network:    192.168.1.0/24"));
        assert!(text.contains("192.168.1.1 - 192.168.1.254"));
        assert!(text.contains("(254 usable)"));
    }

    #[test]
    fn test_render_age() {
        let text = run(r#"{"calculator":"age","birth_date":"2000-01-01","target_date":"2025-01-20"}"#);
        assert!(text.starts_with("25 years, 0 months, 19 days"));
    }

    #[test]
    fn test_render_fraction_mixed() {
        let text = run(
            r#"{"calculator":"fraction","lhs":{"numerator":3,"denominator":4},"operation":"add","rhs":{"numerator":3,"denominator":4}}"#,
        );
        assert!(text.contains("Decimal: 1.5"));
        assert!(text.contains("Mixed:   1 1/2"));
    }

    #[test]
    fn test_catalog_lists_every_calculator() {
        let text = render_catalog();
        for kind in CalculatorKind::ALL {
            assert!(text.contains(kind.slug()));
        }
    }

    #[test]
    fn test_cache_policy_text() {
        assert!(render_cache_policy(CachePolicy::Crawler).contains("Removed: ETag"));
        assert!(!render_cache_policy(CachePolicy::Public).contains("Removed"));
    }
}
