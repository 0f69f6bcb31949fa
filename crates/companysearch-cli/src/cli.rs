use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Plan,
    Count,
    Sample,
    Coverage,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Plan(PlanArgs),
    Count(CountArgs),
    Sample(SampleArgs),
    Coverage(CoverageArgs),
}

/// Where the filter request JSON is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    /// No filter: every company matches.
    None,
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct PlanArgs {
    pub config: Option<PathBuf>,
    pub filter: FilterSource,
    pub page: u32,
    pub page_size: u32,
    /// `None` projects every allowed column.
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CountArgs {
    pub config: Option<PathBuf>,
    pub filter: FilterSource,
}

#[derive(Debug, Clone)]
pub struct SampleArgs {
    pub config: Option<PathBuf>,
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct CoverageArgs {
    pub config: Option<PathBuf>,
    pub companies: Vec<String>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_SAMPLE_LIMIT: u32 = 20;

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    let (topic, rest) = match first.as_str() {
        "-h" | "--help" | "help" => return Ok(Command::Help(HelpTopic::Root)),
        "plan" => (HelpTopic::Plan, it),
        "count" => (HelpTopic::Count, it),
        "sample" => (HelpTopic::Sample, it),
        "coverage" => (HelpTopic::Coverage, it),
        _ => anyhow::bail!("unknown command: {first}"),
    };

    parse_command(topic, rest.map(|s| s.as_str()))
}

fn parse_command<'a>(
    topic: HelpTopic,
    mut it: impl Iterator<Item = &'a str>,
) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut filter = FilterSource::None;
    let mut page: u32 = 1;
    let mut page_size = DEFAULT_PAGE_SIZE;
    let mut fields: Option<Vec<String>> = None;
    let mut limit = DEFAULT_SAMPLE_LIMIT;
    let mut companies: Vec<String> = Vec::new();

    while let Some(token) = it.next() {
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (token, None),
        };

        match (topic, flag) {
            (_, "-h" | "--help") => return Ok(Command::Help(topic)),
            (_, "--config") => {
                config = Some(PathBuf::from(value_of(flag, inline, &mut it)?));
            }
            (HelpTopic::Plan | HelpTopic::Count, "--filter") => {
                filter = match value_of(flag, inline, &mut it)? {
                    "-" => FilterSource::Stdin,
                    path => FilterSource::File(PathBuf::from(path)),
                };
            }
            (HelpTopic::Plan, "--page") => {
                page = parse_positive(flag, value_of(flag, inline, &mut it)?)?;
            }
            (HelpTopic::Plan, "--page-size") => {
                page_size = parse_positive(flag, value_of(flag, inline, &mut it)?)?;
            }
            (HelpTopic::Plan, "--fields") => {
                let parsed = split_csv(value_of(flag, inline, &mut it)?);
                if parsed.is_empty() {
                    anyhow::bail!("--fields must not be empty");
                }
                fields = Some(parsed);
            }
            (HelpTopic::Sample, "--limit") => {
                limit = parse_positive(flag, value_of(flag, inline, &mut it)?)?;
            }
            (HelpTopic::Coverage, "--companies") => {
                companies.extend(split_csv(value_of(flag, inline, &mut it)?));
            }
            (HelpTopic::Coverage, other) if !other.starts_with('-') => {
                companies.push(other.to_string());
            }
            _ => anyhow::bail!("unknown argument: {token}"),
        }
    }

    Ok(match topic {
        HelpTopic::Root => Command::Help(HelpTopic::Root),
        HelpTopic::Plan => Command::Plan(PlanArgs {
            config,
            filter,
            page,
            page_size,
            fields,
        }),
        HelpTopic::Count => Command::Count(CountArgs { config, filter }),
        HelpTopic::Sample => Command::Sample(SampleArgs { config, limit }),
        HelpTopic::Coverage => {
            if companies.is_empty() {
                anyhow::bail!("coverage requires at least one company number");
            }
            Command::Coverage(CoverageArgs { config, companies })
        }
    })
}

fn value_of<'a>(
    flag: &str,
    inline: Option<&'a str>,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<&'a str> {
    match inline.or_else(|| it.next()) {
        Some(v) => Ok(v),
        None => anyhow::bail!("{flag} requires a value"),
    }
}

fn parse_positive(flag: &str, v: &str) -> anyhow::Result<u32> {
    match v.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => anyhow::bail!("{flag} must be a positive integer, got {v:?}"),
    }
}

fn split_csv(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
companysearch - build company search queries without touching the database

USAGE:
  companysearch <COMMAND> [OPTIONS]

COMMANDS:
  plan       Print the paginated search query for a filter
  count      Print the row count query for a filter
  sample     Print the active companies sample query
  coverage   Print enrichment coverage count queries

ENVIRONMENT:
  COMPANYSEARCH_CONFIG  Config file used when --config is not given
  COMPANYSEARCH_LOG     Log filter for stderr output (e.g. companysearch=debug)

Run `companysearch <COMMAND> --help` for command options."
            );
        }
        HelpTopic::Plan => {
            println!(
                "\
USAGE:
  companysearch plan [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: companysearch.toml)
  --filter <FILE>       Search request JSON, `-` for stdin (default: no filter)
  --page <N>            Page number, from 1 (default: 1)
  --page-size <N>       Rows per page (default: 20)
  --fields <A,B,...>    Columns to select (default: all allowed columns)
  -h, --help            Print help"
            );
        }
        HelpTopic::Count => {
            println!(
                "\
USAGE:
  companysearch count [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: companysearch.toml)
  --filter <FILE>       Search request JSON, `-` for stdin (default: no filter)
  -h, --help            Print help"
            );
        }
        HelpTopic::Sample => {
            println!(
                "\
USAGE:
  companysearch sample [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: companysearch.toml)
  --limit <N>           Number of companies (default: 20)
  -h, --help            Print help"
            );
        }
        HelpTopic::Coverage => {
            println!(
                "\
USAGE:
  companysearch coverage [OPTIONS] [COMPANY_NUMBER]...

OPTIONS:
  --config <FILE>       Config file path (default: companysearch.toml)
  --companies <A,B,...> Company numbers (may be repeated)
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        std::iter::once("companysearch")
            .chain(tokens.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_arguments_prints_help() {
        let cmd = parse_args(&args(&[])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Root)));
    }

    #[test]
    fn parse_plan_with_all_options() {
        let cmd = parse_args(&args(&[
            "plan",
            "--config",
            "search.toml",
            "--filter=request.json",
            "--page",
            "3",
            "--page-size=50",
            "--fields",
            "company_number, company_name,",
        ]))
        .unwrap();
        let Command::Plan(plan) = cmd else {
            panic!("expected plan");
        };

        assert_eq!(plan.config, Some(PathBuf::from("search.toml")));
        assert_eq!(plan.filter, FilterSource::File(PathBuf::from("request.json")));
        assert_eq!(plan.page, 3);
        assert_eq!(plan.page_size, 50);
        assert_eq!(
            plan.fields,
            Some(vec!["company_number".to_string(), "company_name".to_string()])
        );
    }

    #[test]
    fn parse_plan_defaults() {
        let Command::Plan(plan) = parse_args(&args(&["plan"])).unwrap() else {
            panic!("expected plan");
        };
        assert_eq!(plan.config, None);
        assert_eq!(plan.filter, FilterSource::None);
        assert_eq!(plan.page, 1);
        assert_eq!(plan.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(plan.fields, None);
    }

    #[test]
    fn filter_dash_reads_stdin() {
        let Command::Count(count) = parse_args(&args(&["count", "--filter", "-"])).unwrap() else {
            panic!("expected count");
        };
        assert_eq!(count.filter, FilterSource::Stdin);
    }

    #[test]
    fn rejects_zero_page() {
        let err = parse_args(&args(&["plan", "--page", "0"])).unwrap_err();
        assert!(err.to_string().contains("--page"));
        assert!(parse_args(&args(&["plan", "--page-size=abc"])).is_err());
    }

    #[test]
    fn rejects_options_of_other_commands() {
        assert!(parse_args(&args(&["sample", "--page", "2"])).is_err());
        assert!(parse_args(&args(&["count", "--fields", "company_name"])).is_err());
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse_args(&args(&["plan", "--filter"])).unwrap_err();
        assert_eq!(err.to_string(), "--filter requires a value");
    }

    #[test]
    fn parse_coverage_companies() {
        let Command::Coverage(cov) = parse_args(&args(&[
            "coverage",
            "--companies",
            "00000001,00000002",
            "00000003",
        ]))
        .unwrap() else {
            panic!("expected coverage");
        };
        assert_eq!(cov.companies, vec!["00000001", "00000002", "00000003"]);
    }

    #[test]
    fn coverage_without_companies_fails() {
        assert!(parse_args(&args(&["coverage"])).is_err());
    }

    #[test]
    fn sample_defaults_to_twenty() {
        let Command::Sample(sample) = parse_args(&args(&["sample"])).unwrap() else {
            panic!("expected sample");
        };
        assert_eq!(sample.limit, 20);

        let Command::Sample(sample) = parse_args(&args(&["sample", "--limit=3"])).unwrap() else {
            panic!("expected sample");
        };
        assert_eq!(sample.limit, 3);
    }

    #[test]
    fn subcommand_help() {
        let cmd = parse_args(&args(&["sample", "--help"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Sample)));
    }

    #[test]
    fn unknown_command() {
        let err = parse_args(&args(&["migrate"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown command: migrate");
    }
}
