use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{LineId, Network, StationId};
use crate::routing::{RouteAlgorithm, RoutePlan};
use crate::search::SearchStats;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    Note,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: StationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Station visited along a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub id: StationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteStep {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Leg of a planned route with resolved names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteLegSummary {
    pub from: String,
    pub to: String,
    pub line_id: LineId,
    pub line: String,
    pub minutes: u32,
    /// `true` when this leg rides a different line than the previous one.
    pub transfer: bool,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub transfer_penalty: u32,
    pub total_minutes: u64,
    pub transfers: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    pub legs: Vec<RouteLegSummary>,
    pub stats: SearchStats,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved station and line names.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Result<Self> {
        let route = &plan.route;
        let (Some(first), Some(last)) = (route.station_ids.first(), route.station_ids.last())
        else {
            return Err(Error::EmptyRoute);
        };

        let station_name = |id: &str| network.station(id).map(|station| station.name.clone());

        let steps = route
            .station_ids
            .iter()
            .enumerate()
            .map(|(index, id)| RouteStep {
                index,
                id: id.clone(),
                name: station_name(id),
            })
            .collect();

        let mut previous_line: Option<&str> = None;
        let legs = route
            .legs
            .iter()
            .map(|leg| {
                let transfer = previous_line.is_some_and(|line| line != leg.line);
                previous_line = Some(leg.line.as_str());
                RouteLegSummary {
                    from: station_name(&leg.from).unwrap_or_else(|| leg.from.clone()),
                    to: station_name(&leg.to).unwrap_or_else(|| leg.to.clone()),
                    line_id: leg.line.clone(),
                    line: network
                        .line(&leg.line)
                        .map(|line| line.name.clone())
                        .unwrap_or_else(|| leg.line.clone()),
                    minutes: leg.minutes,
                    transfer,
                }
            })
            .collect();

        Ok(Self {
            algorithm: plan.algorithm,
            transfer_penalty: plan.transfer_penalty,
            total_minutes: route.total_minutes,
            transfers: route.transfers,
            start: RouteEndpoint {
                id: first.clone(),
                name: station_name(first),
            },
            goal: RouteEndpoint {
                id: last.clone(),
                name: station_name(last),
            },
            steps,
            legs,
            stats: plan.stats,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::Note => self.render_note(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} min, {} transfers, algorithm: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.total_minutes,
            self.transfers,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "{:>3}: {}", step.index, step.display_name());
        }
        if !self.legs.is_empty() {
            let _ = writeln!(buffer, "Legs:");
            for leg in &self.legs {
                let marker = if leg.transfer { "*" } else { " " };
                let _ = writeln!(
                    buffer,
                    " {} {} -> {} ({}, {}m)",
                    marker, leg.from, leg.to, leg.line, leg.minutes
                );
            }
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} min, {} transfers, algorithm: `{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.total_minutes,
            self.transfers,
            self.algorithm
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "* **{}** → **{}** on _{}_ ({} min)",
                leg.from, leg.to, leg.line, leg.minutes
            );
        }
        buffer
    }

    fn render_note(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} -> {} ({} min)",
            self.start.display_name(),
            self.goal.display_name(),
            self.total_minutes
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "{}", step.display_name());
        }
        buffer
    }
}
