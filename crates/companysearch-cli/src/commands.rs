use crate::cli::{CountArgs, CoverageArgs, FilterSource, PlanArgs, SampleArgs};
use crate::config::ProjectConfig;
use companysearch::{CoverageMetric, FilterSpec, QueryBuilder, QueryPlan, SearchParams};
use serde::Serialize;
use std::io::Read;

#[derive(Debug, Serialize)]
struct CoverageEntry<'a> {
    metric: CoverageMetric,
    #[serde(flatten)]
    plan: &'a QueryPlan,
}

pub fn plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::resolve(args.config.clone())?;
    let filter = read_filter(&args.filter)?;
    let out = render_plan(&config, &filter, &args)?;
    println!("{out}");
    Ok(())
}

pub fn count(args: CountArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::resolve(args.config)?;
    let filter = read_filter(&args.filter)?;
    let plan = config.query_builder()?.count(&filter)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

pub fn sample(args: SampleArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::resolve(args.config)?;
    let plan = config.query_builder()?.active_sample(args.limit)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

pub fn coverage(args: CoverageArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::resolve(args.config)?;
    let out = render_coverage(&config.query_builder()?, &args.companies)?;
    println!("{out}");
    Ok(())
}

fn render_plan(
    config: &ProjectConfig,
    filter: &FilterSpec,
    args: &PlanArgs,
) -> anyhow::Result<String> {
    let allow = config.search.field_allow_list()?;
    let fields = match &args.fields {
        Some(requested) => allow.select(requested)?,
        None => allow.select_all(),
    };

    let plan = config
        .query_builder()?
        .build(filter, &fields, args.page, args.page_size)?;
    Ok(serde_json::to_string_pretty(&plan)?)
}

fn render_coverage(builder: &QueryBuilder, companies: &[String]) -> anyhow::Result<String> {
    let plans = builder.coverage(companies)?;
    let entries: Vec<CoverageEntry<'_>> = plans
        .iter()
        .map(|(metric, plan)| CoverageEntry {
            metric: *metric,
            plan,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

fn read_filter(source: &FilterSource) -> anyhow::Result<FilterSpec> {
    let raw = match source {
        FilterSource::None => return Ok(FilterSpec::default()),
        FilterSource::Stdin => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|e| anyhow::anyhow!("failed to read filter from stdin: {e}"))?;
            raw
        }
        FilterSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read filter file {}: {e}", path.display())
        })?,
    };
    parse_filter(&raw)
}

fn parse_filter(raw: &str) -> anyhow::Result<FilterSpec> {
    if raw.trim().is_empty() {
        return Ok(FilterSpec::default());
    }
    let params = SearchParams::from_json(raw)
        .map_err(|e| anyhow::anyhow!("failed to parse filter request: {e}"))?;
    Ok(FilterSpec::from(params))
}
