//! Pure Yew view components for the picker UI.
//!
//! This module contains stateless components that render based on props;
//! all animation state lives in the main component.

use random_picker::CandidateState;
use yew::prelude::*;

/// Map a candidate's display state to its CSS class.
pub fn state_class(state: CandidateState) -> Option<&'static str> {
    match state {
        CandidateState::Idle => None,
        CandidateState::Highlighted => Some("highlight"),
        CandidateState::Winner => Some("active"),
        CandidateState::Loser => Some("loser"),
    }
}

/// One of the two fixed choice cards in left/right mode.
#[derive(Properties, PartialEq)]
pub struct ChoiceCardProps {
    pub label: AttrValue,
    pub state: CandidateState,
}

#[function_component(ChoiceCard)]
pub fn choice_card(props: &ChoiceCardProps) -> Html {
    html! {
        <div class={classes!("card", state_class(props.state))}>
            { props.label.clone() }
        </div>
    }
}

/// The large digit display in number mode. Shows a placeholder until the
/// first run highlights a digit.
#[derive(Properties, PartialEq)]
pub struct GiantDigitProps {
    pub value: Option<usize>,
    pub state: CandidateState,
    pub placeholder: AttrValue,
}

#[function_component(GiantDigit)]
pub fn giant_digit(props: &GiantDigitProps) -> Html {
    let text = match props.value {
        Some(digit) => digit.to_string(),
        None => props.placeholder.to_string(),
    };
    html! {
        <div class={classes!("giant-digit", state_class(props.state))}>
            { text }
        </div>
    }
}
