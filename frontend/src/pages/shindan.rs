use gloo_timers::callback::Timeout;
use log::info;
use yew::prelude::*;

use crate::components::chat_message::{ChatMessage, Speaker};
use crate::components::number_question::NumberQuestion;
use crate::config;
use crate::shindan::answers::{format_man_yen, progress_label};
use crate::shindan::script::{blocks, Block, Question};
use crate::shindan::sequencer::{Category, Event, PendingAdvance, ShindanState};
use crate::shindan::timers::{arm_pending, disarm_all, TimerSet};

const PAGE_STYLE: &str = r#"
    .shindan-page {
        min-height: 100vh;
        background: #f9fafb;
        padding: 2rem 1rem;
        user-select: none;
        -webkit-user-select: none;
        -webkit-touch-callout: none;
    }
    .shindan-column {
        max-width: 42rem;
        margin: 0 auto;
        display: flex;
        flex-direction: column;
        gap: 1.5rem;
    }
    .shindan-page img {
        pointer-events: none;
        -webkit-user-select: none;
        user-select: none;
    }
    .hero-card {
        background: #fff;
        border-radius: 1rem;
        box-shadow: 0 1px 2px rgba(0,0,0,0.05);
        overflow: hidden;
    }
    .hero-card img { width: 100%; height: auto; object-fit: contain; display: block; }
    .shindan-header {
        display: flex;
        justify-content: space-between;
        align-items: center;
        font-size: 0.875rem;
        color: #4b5563;
    }
    .shindan-header .channel { font-weight: 500; }
    @keyframes chatIn {
        from { opacity: 0; transform: translateY(20px); }
        to { opacity: 1; transform: translateY(0); }
    }
    .chat-row {
        display: flex;
        gap: 0.75rem;
        opacity: 0;
        animation: chatIn 0.5s ease-out forwards;
    }
    .chat-row.operator { justify-content: flex-start; }
    .chat-row.user { justify-content: flex-end; }
    .operator-avatar {
        width: 3rem;
        height: 3rem;
        border-radius: 9999px;
        flex-shrink: 0;
        overflow: hidden;
        background: #dbeafe;
    }
    .operator-avatar img { width: 100%; height: 100%; object-fit: cover; }
    .chat-bubble {
        max-width: 28rem;
        padding: 1rem 1.25rem;
        border-radius: 1rem;
        color: #1f2937;
    }
    .chat-bubble.operator { background: #eff6ff; border-top-left-radius: 0.125rem; }
    .chat-bubble.user { background: #e5e7eb; border-top-right-radius: 0.125rem; }
    .chat-answer { font-weight: 600; }
    .category-options { display: flex; flex-direction: column; gap: 0.75rem; }
    .category-option {
        width: 100%;
        background: #eff6ff;
        color: #2563eb;
        font-weight: 600;
        padding: 0.75rem 1.5rem;
        border: none;
        border-radius: 1rem;
        transition: all 0.2s;
        cursor: pointer;
    }
    .category-option:hover { background: #3b82f6; color: #fff; }
    .number-question { display: flex; flex-direction: column; gap: 0.75rem; }
    .number-label { font-size: 0.875rem; font-weight: 600; color: #374151; }
    .number-field { position: relative; margin-top: 0.5rem; }
    .number-field input {
        width: 100%;
        box-sizing: border-box;
        padding: 0.75rem 4rem 0.75rem 1rem;
        border: 1px solid #d1d5db;
        border-radius: 0.5rem;
        color: #1f2937;
    }
    .number-suffix {
        position: absolute;
        right: 1rem;
        top: 50%;
        transform: translateY(-50%);
        color: #6b7280;
        font-weight: 600;
    }
    .number-helper { font-size: 0.75rem; color: #6b7280; margin: 0; }
    .number-submit {
        width: 100%;
        background: #3b82f6;
        color: #fff;
        font-weight: 600;
        padding: 0.75rem 0;
        border: none;
        border-radius: 0.5rem;
        cursor: pointer;
    }
    .number-submit:disabled { opacity: 0.5; cursor: not-allowed; }
    .result-extras {
        display: flex;
        flex-direction: column;
        gap: 2rem;
        opacity: 0;
        animation: chatIn 0.5s ease-out 1s forwards;
    }
    .case-studies { display: flex; flex-direction: column; align-items: center; gap: 1.25rem; }
    .case-card {
        background: #fff;
        padding: 1.25rem;
        border-radius: 1rem;
        box-shadow: 0 0 20px rgba(0,0,0,0.1);
        width: 91%;
    }
    .case-card img { width: 100%; height: auto; border-radius: 0.75rem; }
    .cta-button {
        display: block;
        width: 100%;
        box-sizing: border-box;
        background: #22c55e;
        color: #fff;
        font-weight: 700;
        font-size: 1.875rem;
        padding: 2.25rem 2.5rem;
        border-radius: 1.5rem;
        text-align: center;
        text-decoration: none;
        box-shadow: 0 25px 50px -12px rgba(0,0,0,0.25);
    }
    .cta-button:hover { background: #16a34a; }
    .cta-button span { display: block; }
    @media (min-width: 768px) {
        .cta-button { font-size: 2.25rem; padding: 2.5rem 3rem; }
    }
"#;

const GREETING_DELAY_S: f32 = 0.0;
const PROMPT_DELAY_S: f32 = 0.4;
const REPLY_DELAY_S: f32 = 0.7;

#[function_component(ShindanPage)]
pub fn shindan_page() -> Html {
    let state = use_reducer(ShindanState::default);
    let timers = use_mut_ref(TimerSet::<Timeout>::new);

    // Teardown: nothing scheduled may fire once the page is gone.
    {
        let timers = timers.clone();
        use_effect_with_deps(
            move |_| {
                info!("shindan page mounted");
                disarm_all(timers)
            },
            (),
        );
    }

    // One live timer per pending advance.
    {
        let timers = timers.clone();
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |pending: &Option<PendingAdvance>| {
                arm_pending(timers, *pending, move |p| {
                    Timeout::new(p.delay_ms, move || {
                        dispatcher.dispatch(Event::AutoAdvance { ticket: p.ticket });
                    })
                })
            },
            state.pending,
        );
    }

    let block_suppress = Callback::from(|e: web_sys::Event| e.prevent_default());
    let block_menu = Callback::from(|e: MouseEvent| e.prevent_default());

    html! {
        <div
            class="shindan-page"
            oncontextmenu={block_menu}
            oncopy={block_suppress.clone()}
            oncut={block_suppress}
        >
            <style>{PAGE_STYLE}</style>
            <div class="shindan-column">
                <div class="hero-card">
                    <img draggable="false" src={config::HERO_IMAGE} alt="キャッチコピー" loading="eager" />
                </div>

                <div class="shindan-header">
                    <span class="channel">{"たくやの投資チャンネル"}</span>
                    <span>{progress_label(state.step)}</span>
                </div>

                { for blocks(&state).into_iter().map(|block| render_block(block, &state)) }
            </div>
        </div>
    }
}

fn render_block(block: Block, state: &UseReducerHandle<ShindanState>) -> Html {
    match block {
        Block::Greeting => html! {
            <ChatMessage speaker={Speaker::Operator} delay={GREETING_DELAY_S}>
                <p>
                    {"こんにちは！たくやの投資チャンネルです。"}
                    <br />
                    {"いくつか質問させてください！"}
                </p>
            </ChatMessage>
        },
        Block::Prompt(question) => html! {
            <ChatMessage speaker={Speaker::Operator} delay={PROMPT_DELAY_S}>
                <p>{question.prompt()}</p>
            </ChatMessage>
        },
        Block::CategoryPicker => {
            let selected = state.answers.category;
            html! {
                <ChatMessage speaker={Speaker::User} delay={REPLY_DELAY_S}>
                    <div class="category-options" role="radiogroup" aria-label="投資先">
                        {
                            for Category::ALL.iter().map(|&category| {
                                let onclick = {
                                    let state = state.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        state.dispatch(Event::SelectCategory(category))
                                    })
                                };
                                html! {
                                    <button
                                        class="category-option"
                                        role="radio"
                                        aria-checked={(selected == Some(category)).to_string()}
                                        {onclick}
                                    >
                                        {category.label()}
                                    </button>
                                }
                            })
                        }
                    </div>
                </ChatMessage>
            }
        }
        Block::CategoryAnswer(category) => html! {
            <ChatMessage speaker={Speaker::User} delay={REPLY_DELAY_S}>
                <p class="chat-answer">{category.map(Category::label).unwrap_or_default()}</p>
            </ChatMessage>
        },
        Block::AmountInput(question) => render_amount_input(question, state),
        Block::AmountAnswer(_, amount) => html! {
            <ChatMessage speaker={Speaker::User} delay={REPLY_DELAY_S}>
                <p class="chat-answer">{format_man_yen(amount.as_ref())}</p>
            </ChatMessage>
        },
        Block::ResultPitch => html! {
            <>
                <ChatMessage speaker={Speaker::Operator} delay={0.4}>
                    <p>{"いまの設計だと「時間損失」が生まれる可能性があります。"}</p>
                </ChatMessage>
                <ChatMessage speaker={Speaker::Operator} delay={0.8}>
                    <p>
                        {"守りと攻めのバランスを整える\"ハイブリッド戦略\"を学ぶことで、"}
                        {"同じ元手でも、10年後の結果を大きく変えることができます。"}
                    </p>
                </ChatMessage>
            </>
        },
        Block::CaseStudies => html! {
            <div class="result-extras">
                <div class="case-studies">
                    {
                        for config::CASE_IMAGES.iter().map(|(src, alt)| html! {
                            <div class="case-card">
                                <img draggable="false" src={*src} alt={*alt} />
                            </div>
                        })
                    }
                </div>
            </div>
        },
        Block::CallToAction => html! {
            <div class="result-extras">
                <a href={config::CTA_URL} class="cta-button">
                    <span>{"\"ハイブリッド戦略\"を"}</span>
                    <span>{"LINEで確認する▶"}</span>
                </a>
            </div>
        },
    }
}

fn render_amount_input(question: Question, state: &UseReducerHandle<ShindanState>) -> Html {
    let (label, submit_text, value, disabled) = match question {
        Question::TargetAssets => (
            "目標の資産額",
            "結果を見る",
            state.answers.target_assets.clone(),
            !state.can_submit_target(),
        ),
        _ => (
            "現在の資産額",
            "次へ",
            state.answers.current_assets.clone(),
            !state.can_submit_current(),
        ),
    };

    let on_input = {
        let state = state.clone();
        Callback::from(move |raw: String| {
            state.dispatch(match question {
                Question::TargetAssets => Event::EditTargetAssets(raw),
                _ => Event::EditCurrentAssets(raw),
            })
        })
    };
    let on_submit = {
        let state = state.clone();
        Callback::from(move |raw: String| {
            state.dispatch(match question {
                Question::TargetAssets => Event::SubmitTargetAssets(raw),
                _ => Event::SubmitCurrentAssets(raw),
            })
        })
    };

    html! {
        <ChatMessage speaker={Speaker::User} delay={REPLY_DELAY_S}>
            <NumberQuestion
                label={label}
                value={value}
                {on_input}
                {on_submit}
                submit_text={submit_text}
                disabled={disabled}
                locked={state.is_locked()}
            />
        </ChatMessage>
    }
}
