use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::shindan::answers::{field_text, sanitize_amount, Amount};

#[derive(Properties, PartialEq)]
pub struct NumberQuestionProps {
    pub label: AttrValue,
    pub value: Option<Amount>,
    /// Raw text of the field on every keystroke.
    pub on_input: Callback<String>,
    /// Raw text of the field when the visitor confirms.
    pub on_submit: Callback<String>,
    #[prop_or(AttrValue::Static("万円"))]
    pub suffix: AttrValue,
    #[prop_or(AttrValue::Static("半角数字のみ。0以上の整数で入力してください。"))]
    pub helper: AttrValue,
    #[prop_or(AttrValue::Static("次へ"))]
    pub submit_text: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    /// Freezes the whole control once the answer has been submitted.
    #[prop_or_default]
    pub locked: bool,
}

#[function_component(NumberQuestion)]
pub fn number_question(props: &NumberQuestionProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            // The stored value may not change (e.g. a stray letter), so no
            // re-render would clear the field. Write the cleaned text back.
            let clean = field_text(sanitize_amount(&raw).as_ref());
            if clean != raw {
                input.set_value(&clean);
            }
            on_input.emit(raw);
        })
    };

    let onkeydown = {
        let on_submit = props.on_submit.clone();
        let disabled = props.disabled || props.locked;
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !disabled {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_submit.emit(input.value());
            }
        })
    };

    let onclick = {
        let on_submit = props.on_submit.clone();
        let text = field_text(props.value.as_ref());
        Callback::from(move |_: MouseEvent| on_submit.emit(text.clone()))
    };

    html! {
        <div class="number-question">
            <label>
                <span class="number-label">{ props.label.clone() }</span>
                <div class="number-field">
                    <input
                        type="text"
                        inputmode="numeric"
                        pattern="[0-9]*"
                        placeholder="例：1000"
                        value={field_text(props.value.as_ref())}
                        disabled={props.locked}
                        {oninput}
                        {onkeydown}
                    />
                    <span class="number-suffix">{ props.suffix.clone() }</span>
                </div>
            </label>
            <p class="number-helper">{ props.helper.clone() }</p>
            <button class="number-submit" disabled={props.disabled || props.locked} {onclick}>
                { props.submit_text.clone() }
            </button>
        </div>
    }
}
