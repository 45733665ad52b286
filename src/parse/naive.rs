use super::error::ParseError;
use super::Parser;
use crate::{InputAttribute, OutputAttribute, ParsedRule};

/// Splits the entry on `->`, `(`, `)`, `,` and `=`.
///
/// Attribute markers are recognised by substring containment, so `xPRx=a`
/// sets the platform region. Repeated attributes overwrite each other and
/// malformed pieces are skipped. The only reported error is an empty plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveParser;

impl Parser for NaiveParser {
    fn parse(&self, entry: &str) -> Result<ParsedRule, Vec<ParseError>> {
        let mut sides = entry.split("->");
        let input_part = sides.next().unwrap_or_default();
        let output_part = sides.next();

        let mut plan_and_inputs = input_part.split('(');
        let plan = plan_and_inputs.next().unwrap_or_default();
        let mut rule = ParsedRule::new(plan).map_err(|err| vec![err])?;

        if let Some(inputs) = plan_and_inputs.next() {
            let inputs = inputs.trim();
            let inputs = inputs.strip_suffix(')').unwrap_or(inputs);
            for attr in inputs.split(',') {
                let Some(value) = attr.split('=').nth(1).map(str::trim) else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                if attr.contains("PR") {
                    rule.assign_input(InputAttribute::PlatformRegion, value);
                }
                if attr.contains("HR") {
                    rule.assign_input(InputAttribute::HyperscalerRegion, value);
                }
            }
        }

        if let Some(outputs) = output_part {
            for attr in outputs.split(',') {
                if attr.contains('S') {
                    rule.assign_output(OutputAttribute::Shared);
                }
                if attr.contains("EU") {
                    rule.assign_output(OutputAttribute::EuAccess);
                }
            }
        }

        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(entry: &str) -> ParsedRule {
        NaiveParser.parse(entry).unwrap()
    }

    #[test]
    fn parse_plan_only() {
        assert_eq!(parse("aws"), ParsedRule::new("aws").unwrap());
    }

    #[test]
    fn parse_full_entry() {
        let rule = parse("azure(PR=westeurope, HR=easteurope)->EU,S");
        assert_eq!(rule.platform_region.as_deref(), Some("westeurope"));
        assert_eq!(rule.hyperscaler_region.as_deref(), Some("easteurope"));
        assert!(rule.eu_access);
        assert!(rule.shared);
    }

    #[test]
    fn parse_wildcard_suffix() {
        let rule = parse("aws(HR=*)");
        assert!(rule.hyperscaler_region_suffix);
        assert_eq!(rule.hyperscaler_region, None);
    }

    #[test]
    fn empty_plan_is_the_only_error() {
        assert!(NaiveParser.parse("").is_err());
        assert!(NaiveParser.parse("(PR=x)").is_err());
        assert!(NaiveParser.parse("->EU").is_err());
    }

    #[test]
    fn markers_matched_by_containment() {
        let rule = parse("aws(xPRx=a)");
        assert_eq!(rule.platform_region.as_deref(), Some("a"));
    }

    #[test]
    fn duplicates_overwrite() {
        let rule = parse("aws(PR=a,PR=b)->EU,EU");
        assert_eq!(rule.platform_region.as_deref(), Some("b"));
        assert!(rule.eu_access);
    }

    #[test]
    fn malformed_pieces_skipped() {
        let rule = parse("test(,PR,HR=)->,");
        assert_eq!(rule, ParsedRule::new("test").unwrap());
    }
}
