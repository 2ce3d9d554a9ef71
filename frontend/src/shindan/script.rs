//! Which chat blocks are on screen for a given state.
//!
//! History is kept: every step up to the current one stays visible. The
//! question being asked right now shows its control, earlier ones show the
//! stored answer.

use super::answers::Amount;
use super::sequencer::{Category, ShindanState, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Question {
    Category,
    CurrentAssets,
    TargetAssets,
}

impl Question {
    pub fn step(self) -> Step {
        match self {
            Question::Category => Step::Category,
            Question::CurrentAssets => Step::CurrentAssets,
            Question::TargetAssets => Step::TargetAssets,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Question::Category => "残り3問) メインで取引している投資先を教えてください。",
            Question::CurrentAssets => "残り2問) 現在の資産額を教えてください。",
            Question::TargetAssets => "残り1問) 目標の資産額を教えてください。",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Greeting,
    Prompt(Question),
    CategoryPicker,
    CategoryAnswer(Option<Category>),
    AmountInput(Question),
    AmountAnswer(Question, Option<Amount>),
    ResultPitch,
    CaseStudies,
    CallToAction,
}

impl Block {
    /// The step that first reveals this block.
    #[cfg(test)]
    pub fn revealed_at(&self) -> Step {
        match self {
            Block::Greeting => Step::Greeting,
            Block::Prompt(q) | Block::AmountInput(q) | Block::AmountAnswer(q, _) => q.step(),
            Block::CategoryPicker | Block::CategoryAnswer(_) => Step::Category,
            Block::ResultPitch | Block::CaseStudies | Block::CallToAction => Step::Result,
        }
    }
}

pub fn blocks(state: &ShindanState) -> Vec<Block> {
    let step = state.step;
    let answers = &state.answers;
    let mut out = vec![Block::Greeting];

    if step >= Step::Category {
        out.push(Block::Prompt(Question::Category));
        out.push(if step == Step::Category {
            Block::CategoryPicker
        } else {
            Block::CategoryAnswer(answers.category)
        });
    }

    for (question, amount) in [
        (Question::CurrentAssets, &answers.current_assets),
        (Question::TargetAssets, &answers.target_assets),
    ] {
        if step >= question.step() {
            out.push(Block::Prompt(question));
            out.push(if step == question.step() {
                Block::AmountInput(question)
            } else {
                Block::AmountAnswer(question, amount.clone())
            });
        }
    }

    if step >= Step::Result {
        out.push(Block::ResultPitch);
        out.push(Block::CaseStudies);
        out.push(Block::CallToAction);
    }
    out
}
