//! Results of the selected entity, as shown next to the 3D view

use std::fmt;

use serde::Serialize;

use crate::config::ViewConfig;
use crate::elements::Dof;
use crate::loads::{ForceComponent, LoadVector};
use crate::model::Structure;
use crate::results::{NodeDisplacement, ResultSet};
use crate::scene::{EntityKind, EntityRef};
use crate::selection::SelectionState;

pub const NO_RESULTS_MESSAGE: &str =
    "No results available. Calculate this structure or open a calculation structure.";
pub const CLICK_MESSAGE: &str = "Click on a entity to see results.";

/// Fraction digits that print any f64 exactly
const EXACT_DIGITS: usize = 800;

/// Exponential notation with `digits` fraction digits and an explicitly
/// signed exponent, e.g. `1.5000e+0`.
///
/// Ties round away from zero and negative zero prints as zero, matching
/// `Number.prototype.toExponential`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let exact = format!("{:.*e}", EXACT_DIGITS.max(digits + 1), value.abs());
    let Some((mantissa, exp)) = exact.split_once('e') else {
        return exact;
    };
    let mut exp: i32 = exp.parse().unwrap_or(0);
    let mut kept: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let round_up = kept.get(digits + 1).is_some_and(|d| *d >= 5);
    kept.truncate(digits + 1);
    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            kept.truncate(digits + 1);
            exp += 1;
        }
    }

    let mut text = String::with_capacity(digits + 8);
    if value < 0.0 {
        text.push('-');
    }
    for (i, d) in kept.iter().enumerate() {
        if i == 1 {
            text.push('.');
        }
        text.push(char::from(b'0' + d));
    }
    if exp >= 0 {
        text.push_str(&format!("e+{}", exp));
    } else {
        text.push_str(&format!("e{}", exp));
    }
    text
}

/// Whether a value reads as favorable (non-negative) or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelValue {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl PanelValue {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: to_exponential(value, 4),
            tone: Tone::of(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSection {
    pub legend: String,
    pub values: Vec<PanelValue>,
}

/// What the results panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelReport {
    Message { text: String },
    Entity {
        title: String,
        heading: String,
        sections: Vec<PanelSection>,
    },
}

impl PanelReport {
    fn message(text: impl Into<String>) -> Self {
        PanelReport::Message { text: text.into() }
    }
}

impl fmt::Display for PanelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelReport::Message { text } => write!(f, "{}", text),
            PanelReport::Entity {
                title,
                heading,
                sections,
            } => {
                writeln!(f, "{}", title)?;
                write!(f, "{}", heading)?;
                for section in sections {
                    write!(f, "\n  {}", section.legend)?;
                    for v in &section.values {
                        write!(f, "\n    {}: {}", v.label, v.value)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn section(legend: &str, values: Vec<PanelValue>) -> PanelSection {
    PanelSection {
        legend: legend.to_string(),
        values,
    }
}

fn dof_values(d: &NodeDisplacement, dofs: [Dof; 3]) -> Vec<PanelValue> {
    dofs.iter().map(|&dof| PanelValue::new(dof.label(), d.get(dof))).collect()
}

fn component_values(v: &LoadVector, components: [ForceComponent; 3]) -> Vec<PanelValue> {
    components
        .iter()
        .map(|&c| PanelValue::new(c.label(), v.get(c)))
        .collect()
}

const FORCES: [ForceComponent; 3] = [ForceComponent::Fx, ForceComponent::Fy, ForceComponent::Fz];
const MOMENTS: [ForceComponent; 3] = [ForceComponent::Mx, ForceComponent::My, ForceComponent::Mz];

/// Builds the panel contents for a selection
#[derive(Debug, Clone)]
pub struct ResultsPanel {
    pub load_case: String,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self {
            load_case: "L1".to_string(),
        }
    }
}

impl From<&ViewConfig> for ResultsPanel {
    fn from(config: &ViewConfig) -> Self {
        Self::new(config.results_load_case.clone())
    }
}

impl ResultsPanel {
    pub fn new(load_case: impl Into<String>) -> Self {
        Self {
            load_case: load_case.into(),
        }
    }

    pub fn report(&self, structure: &Structure, state: &SelectionState) -> PanelReport {
        if !structure.has_results() {
            return PanelReport::message(NO_RESULTS_MESSAGE);
        }
        let entity = match (&state.selection, state.click_void) {
            (Some(entity), false) => entity,
            _ => return PanelReport::message(CLICK_MESSAGE),
        };
        match structure.result_set(&self.load_case) {
            Some(set) => self.entity_report(set, entity),
            None => self.missing(entity),
        }
    }

    fn missing(&self, entity: &EntityRef) -> PanelReport {
        PanelReport::message(format!(
            "No results for '{}' in load case {}.",
            entity.name, self.load_case
        ))
    }

    fn entity_report(&self, set: &ResultSet, entity: &EntityRef) -> PanelReport {
        let name = &entity.name;
        match entity.kind {
            EntityKind::Node => match set.displacement(name) {
                Some(d) => PanelReport::Entity {
                    title: "Node Results".to_string(),
                    heading: format!("Name: {}", name),
                    sections: vec![
                        section("Displacements", dof_values(d, [Dof::Dx, Dof::Dy, Dof::Dz])),
                        section("Rotations", dof_values(d, [Dof::Rx, Dof::Ry, Dof::Rz])),
                    ],
                },
                None => self.missing(entity),
            },
            EntityKind::Bar => match set.extreme_forces(name) {
                Some(row) => {
                    let (start, end) = (row.start(), row.end());
                    PanelReport::Entity {
                        title: "Bar Results".to_string(),
                        heading: format!("Bar: {}", row.bar),
                        sections: vec![
                            section("Initial Node Forces", component_values(&start, FORCES)),
                            section("Initial Node Moments", component_values(&start, MOMENTS)),
                            section("End Node Forces", component_values(&end, FORCES)),
                            section("End Node Moments", component_values(&end, MOMENTS)),
                        ],
                    }
                }
                None => self.missing(entity),
            },
            EntityKind::Support => match set.reaction(name) {
                Some(r) => PanelReport::Entity {
                    title: "Support Results".to_string(),
                    heading: format!("Node: {}", name),
                    sections: vec![
                        section("Forces", component_values(r, FORCES)),
                        section("Moments", component_values(r, MOMENTS)),
                    ],
                },
                None => self.missing(entity),
            },
        }
    }
}
