//! The four commands: list diseases, aggregate, color the map, summarize.

use crate::inputs::{Inputs, SelectionArgs, SourceArg};
use crate::report::{self, DatasetSummary};
use anyhow::Context;
use cid_data::bucket::ColorStrategy;
use cid_data::color::Rgb;
use cid_data::dashboard::{Dashboard, DashboardView};
use log::info;
use serde::Serialize;

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn current_view(dashboard: &Dashboard) -> anyhow::Result<&DashboardView> {
    dashboard.view().context("Dashboard has no view")
}

/// List distinct diseases in load order, or those matching `search`.
pub async fn run_diseases(inputs: &Inputs, search: Option<&str>) -> anyhow::Result<()> {
    let dashboard = inputs.open_dashboard(|_| {}).await?;
    let diseases: Vec<&str> = match search {
        Some(query) => dashboard.search_diseases(query),
        None => dashboard.diseases().iter().map(String::as_str).collect(),
    };
    info!("{} diseases matched", diseases.len());

    if inputs.json {
        return print_json(&diseases);
    }
    for disease in diseases {
        println!("{}", disease);
    }
    Ok(())
}

pub async fn run_aggregate(
    inputs: &Inputs,
    selection: &SelectionArgs,
    sex_source: Option<SourceArg>,
    total_source: Option<SourceArg>,
) -> anyhow::Result<()> {
    let mut dashboard = inputs
        .open_dashboard(|config| {
            if let Some(source) = sex_source {
                config.series.sex = source.into();
            }
            if let Some(source) = total_source {
                config.series.total = source.into();
            }
        })
        .await?;
    selection.apply(&mut dashboard)?;
    let view = current_view(&dashboard)?;

    if inputs.json {
        return print_json(&serde_json::json!({
            "selection": view.selection,
            "series": view.aggregation.series(),
            "highest_gender_value": view.aggregation.highest_gender_value,
            "highest_county_value": view.aggregation.highest_county_value,
            "sex_distribution": view.sex_distribution,
        }));
    }
    print!(
        "{}",
        report::aggregation_table(&view.selection, &view.aggregation, &view.sex_distribution)
    );
    Ok(())
}

pub async fn run_colors(
    inputs: &Inputs,
    selection: &SelectionArgs,
    gradient: Option<&[Rgb]>,
) -> anyhow::Result<()> {
    let strategy = match gradient {
        Some([start, end]) => Some(ColorStrategy::Gradient {
            start: *start,
            end: *end,
        }),
        Some(other) => anyhow::bail!("--gradient takes two colors, got {}", other.len()),
        None => None,
    };
    let mut dashboard = inputs
        .open_dashboard(|config| {
            if let Some(strategy) = strategy {
                config.color_strategy = strategy;
            }
        })
        .await?;
    selection.apply(&mut dashboard)?;
    let view = current_view(&dashboard)?;

    if inputs.json {
        return print_json(&view.county_colors);
    }
    print!("{}", report::colors_table(&view.selection, &view.county_colors));
    Ok(())
}

pub async fn run_summary(inputs: &Inputs) -> anyhow::Result<()> {
    let dashboard = inputs.open_dashboard(|_| {}).await?;
    let dataset = dashboard.dataset().context("Dashboard has no dataset")?;
    let summary = DatasetSummary::from_dataset(dataset);

    if inputs.json {
        return print_json(&summary);
    }
    print!("{}", report::summary_table(&summary));
    Ok(())
}
