//! Turning a parsed bench description into configuration and holes.

use crate::board::{ConnectorRegistry, Declaration, MatchPolicy};
use crate::config::{BenchConfig, KnobConfig};
use crate::dsl::{DirectiveDef, DirectiveKind, HoleDef, MAX_DECLARATIONS};
use crate::error::{BenchError, Result};
use crate::geometry::Point;
use crate::physics::KnobSelector;

/// Fold directives over the default configuration, in source order.
///
/// Later directives override earlier ones. The result is not validated
/// here; [`super::LabBench::new`] does that.
pub fn config_from_directives(directives: &[DirectiveDef]) -> Result<BenchConfig> {
    let mut config = BenchConfig::default();

    for d in directives {
        match d.kind {
            DirectiveKind::Rope => {
                check_params(d, &["resolution", "sag"])?;
                no_value(d)?;
                if let Some(&n) = d.params.get("resolution") {
                    config.rope.resolution = to_count(d, "resolution", n)?;
                }
                if let Some(&sag) = d.params.get("sag") {
                    config.rope.sag = sag as f32;
                }
            }
            DirectiveKind::Snap => {
                check_params(d, &["radius"])?;
                config.wiring.snap_radius = value_or_param(d, "radius")? as f32;
            }
            DirectiveKind::Erase => {
                check_params(d, &["radius"])?;
                config.wiring.delete_radius = value_or_param(d, "radius")? as f32;
            }
            DirectiveKind::Knob => {
                check_params(d, &["max_angle", "max_voltage", "offset", "sensitivity"])?;
                no_value(d)?;
                let selector = single_arg(d, "knob")?;
                let knob = KnobSelector::from_str(selector).ok_or_else(|| {
                    BenchError::invalid_parameter(
                        d.kind.name(),
                        "knob",
                        format!("expected 'coarse' or 'fine', got '{}'", selector),
                    )
                })?;
                let base = match knob {
                    KnobSelector::Coarse => &config.physics.coarse,
                    KnobSelector::Fine => &config.physics.fine,
                };
                let param = |name: &str, current: f64| d.params.get(name).copied().unwrap_or(current);
                let updated = KnobConfig {
                    max_angle: param("max_angle", base.max_angle),
                    max_voltage: param("max_voltage", base.max_voltage),
                    sensitivity: param("sensitivity", base.sensitivity),
                    starting_offset: param("offset", base.starting_offset),
                };
                config = match knob {
                    KnobSelector::Coarse => config.with_coarse_knob(updated),
                    KnobSelector::Fine => config.with_fine_knob(updated),
                };
            }
            DirectiveKind::Series => {
                check_params(d, &["r"])?;
                config.physics.series_resistance = value_or_param(d, "r")?;
            }
            DirectiveKind::Diode => {
                check_params(d, &["threshold", "r"])?;
                no_value(d)?;
                if let Some(&v) = d.params.get("threshold") {
                    config.physics.diode_threshold = v;
                }
                if let Some(&v) = d.params.get("r") {
                    config.physics.diode_resistance = v;
                }
            }
            DirectiveKind::Policy => {
                check_params(d, &[])?;
                no_value(d)?;
                let name = single_arg(d, "policy")?;
                let policy = MatchPolicy::from_str(name).ok_or_else(|| {
                    BenchError::invalid_parameter(
                        d.kind.name(),
                        "policy",
                        format!("expected 'strict' or 'permissive', got '{}'", name),
                    )
                })?;
                config = config.with_match_policy(policy);
            }
            DirectiveKind::Banner => {
                check_params(d, &["rise", "duration"])?;
                no_value(d)?;
                if let Some(&v) = d.params.get("rise") {
                    config.banner.rise = v as f32;
                }
                if let Some(&v) = d.params.get("duration") {
                    config.banner.duration = v as f32;
                }
            }
        }

        if !matches!(d.kind, DirectiveKind::Knob | DirectiveKind::Policy) && !d.args.is_empty() {
            return Err(BenchError::invalid_parameter(
                d.kind.name(),
                &d.args[0],
                format!("unexpected argument at line {}", d.line),
            ));
        }
    }

    Ok(config)
}

/// Register every hole, in declaration order.
pub fn registry_from_holes(holes: &[HoleDef]) -> Result<ConnectorRegistry> {
    let mut builder = ConnectorRegistry::builder();

    for hole in holes {
        if hole.declarations.len() > MAX_DECLARATIONS {
            return Err(BenchError::invalid_connector(
                &hole.name,
                hole.line,
                format!("at most {} declarations are allowed", MAX_DECLARATIONS),
            ));
        }

        let (x, y) = (hole.x as f32, hole.y as f32);
        if !x.is_finite() || !y.is_finite() {
            return Err(BenchError::invalid_connector(
                &hole.name,
                hole.line,
                "coordinates must be finite",
            ));
        }

        let mut declarations: [Declaration; 2] = Default::default();
        for (slot, def) in declarations.iter_mut().zip(&hole.declarations) {
            *slot = Declaration::new(def.own.as_str(), def.target.as_str());
        }

        builder.add(hole.name.as_str(), Point::new(x, y), declarations)?;
    }

    Ok(builder.build())
}

fn check_params(d: &DirectiveDef, allowed: &[&str]) -> Result<()> {
    match d.params.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(BenchError::invalid_parameter(
            d.kind.name(),
            key,
            format!("unknown parameter at line {}", d.line),
        )),
        None => Ok(()),
    }
}

fn no_value(d: &DirectiveDef) -> Result<()> {
    match d.value {
        Some(v) => Err(BenchError::invalid_parameter(
            d.kind.name(),
            v.to_string(),
            format!("unexpected value at line {}", d.line),
        )),
        None => Ok(()),
    }
}

fn value_or_param(d: &DirectiveDef, param: &str) -> Result<f64> {
    match (d.value, d.params.get(param)) {
        (Some(v), None) | (None, Some(&v)) => Ok(v),
        (Some(_), Some(_)) => Err(BenchError::invalid_parameter(
            d.kind.name(),
            param,
            format!("given twice at line {}", d.line),
        )),
        (None, None) => Err(BenchError::invalid_parameter(
            d.kind.name(),
            param,
            format!("missing value at line {}", d.line),
        )),
    }
}

fn single_arg<'a>(d: &'a DirectiveDef, what: &str) -> Result<&'a str> {
    match d.args.as_slice() {
        [arg] => Ok(arg.as_str()),
        _ => Err(BenchError::invalid_parameter(
            d.kind.name(),
            what,
            format!("expected exactly one {} name at line {}", what, d.line),
        )),
    }
}

fn to_count(d: &DirectiveDef, param: &str, value: f64) -> Result<usize> {
    // usize::MAX rounds up to 2^64 as f64, so the bound is exclusive.
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(BenchError::invalid_parameter(
            d.kind.name(),
            param,
            format!("expected a whole number, got {}", value),
        ))
    }
}
