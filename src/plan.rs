//! Turns user intents into the ordered [`Action`]s which carry them out.
//!
//! Nothing in here runs anything. Every function is a pure mapping from a
//! [`Snapshot`] to the invocations, ordered by discovery order of the outputs.
use crate::{
    backend::Action,
    topology::{scale_factor, Output, Resolution, Snapshot},
};

/// All outputs except `primary`, in discovery order.
pub fn secondaries<'s>(snapshot: &'s Snapshot, primary: &'s str) -> impl Iterator<Item = &'s Output> {
    snapshot
        .outputs()
        .iter()
        .filter(move |output| output.name != primary)
}

/// Mirrors every other output onto `primary`.
pub fn duplicate(snapshot: &Snapshot, primary: &str) -> Vec<Action> {
    secondaries(snapshot, primary)
        .map(|output| Action::SameAs {
            output: output.name.clone(),
            target: primary.to_string(),
        })
        .collect()
}

/// Places every output right of its predecessor.
pub fn extend(snapshot: &Snapshot) -> Vec<Action> {
    snapshot
        .outputs()
        .windows(2)
        .map(|pair| Action::RightOf {
            output: pair[1].name.clone(),
            anchor: pair[0].name.clone(),
        })
        .collect()
}

/// One mode change per selection, in the given order.
pub fn set_modes<S: AsRef<str>>(selections: &[(S, Resolution)]) -> Vec<Action> {
    selections
        .iter()
        .map(|(output, resolution)| Action::Mode {
            output: output.as_ref().to_string(),
            resolution: *resolution,
        })
        .collect()
}

/// Shrinks every output whose current resolution exceeds `base`.
pub fn scale_to(snapshot: &Snapshot, base: Resolution) -> Vec<Action> {
    snapshot
        .outputs()
        .iter()
        .filter_map(|output| {
            let current = output.current_resolution?;
            let factor = scale_factor(base, current)?;

            Some(Action::Scale {
                output: output.name.clone(),
                factor,
            })
        })
        .collect()
}

/// Sets every output to the highest resolution all of them support.
///
/// Returns `None` if they don't share any.
pub fn uniform_mode(snapshot: &Snapshot) -> Option<Vec<Action>> {
    let highest = snapshot.highest_common_resolution(&snapshot.names())?;

    let actions = snapshot
        .outputs()
        .iter()
        .map(|output| Action::Mode {
            output: output.name.clone(),
            resolution: highest,
        })
        .collect();

    Some(actions)
}

pub fn enable_primary(primary: &str) -> Vec<Action> {
    vec![Action::Auto {
        output: primary.to_string(),
    }]
}

pub fn disable_primary(primary: &str) -> Vec<Action> {
    vec![Action::Off {
        output: primary.to_string(),
    }]
}

/// Drives each secondary output at the highest resolution it shares with
/// `primary`, or with its preferred mode if they share none.
pub fn enable_secondary(snapshot: &Snapshot, primary: &str) -> Vec<Action> {
    secondaries(snapshot, primary)
        .map(|output| {
            let name = output.name.clone();
            match snapshot.highest_common_resolution(&[name.as_str(), primary]) {
                Some(resolution) => Action::Mode {
                    output: name,
                    resolution,
                },
                None => Action::Auto { output: name },
            }
        })
        .collect()
}

pub fn disable_secondary(snapshot: &Snapshot, primary: &str) -> Vec<Action> {
    secondaries(snapshot, primary)
        .map(|output| Action::Off {
            output: output.name.clone(),
        })
        .collect()
}
