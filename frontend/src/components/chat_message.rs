use yew::prelude::*;

use crate::config;

#[derive(Clone, Copy, PartialEq)]
pub enum Speaker {
    Operator,
    User,
}

#[derive(Properties, PartialEq)]
pub struct ChatMessageProps {
    pub speaker: Speaker,
    /// Seconds before the fade-in starts.
    #[prop_or(0.0)]
    pub delay: f32,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ChatMessage)]
pub fn chat_message(props: &ChatMessageProps) -> Html {
    let (row_class, bubble_class) = match props.speaker {
        Speaker::Operator => ("chat-row operator", "chat-bubble operator"),
        Speaker::User => ("chat-row user", "chat-bubble user"),
    };

    html! {
        <div
            class={row_class}
            style={format!("animation-delay: {}s;", props.delay)}
            role="region"
            aria-live="polite"
        >
            {
                if props.speaker == Speaker::Operator {
                    html! {
                        <div class="operator-avatar">
                            <img draggable="false" src={config::OPERATOR_ICON} alt="オペレーター" />
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div class={bubble_class}>
                { for props.children.iter() }
            </div>
        </div>
    }
}
