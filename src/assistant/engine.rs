// src/assistant/engine.rs
//
// The assistant's two timed sequences, modeled as explicit state machines
// advanced by `Duration` deltas. The plugin feeds real frame time; tests
// feed virtual time, so behavior is deterministic without rendering.
use std::collections::VecDeque;
use std::time::Duration;

use crate::review::definitions::{AgentMessage, MessageRole};

use super::responses;

/// Latency between accepting a chat message and appending its reply.
pub const CHAT_REPLY_LATENCY: Duration = Duration::from_millis(1800);
/// Pause between the end of one thinking stage's word stream and the next.
pub const STAGE_PAUSE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct ThinkingStage {
    pub title: &'static str,
    pub narration: &'static str,
    pub duration: Duration,
}

impl ThinkingStage {
    fn word_count(&self) -> usize {
        self.narration.split_whitespace().count()
    }
}

pub const THINKING_STAGES: [ThinkingStage; 3] = [
    ThinkingStage {
        title: "Scanning documents",
        narration: "Reading all six uploaded documents and extracting box-level values, \
                    noting one W-2 with OCR confidence below the review threshold.",
        duration: Duration::from_millis(2600),
    },
    ThinkingStage {
        title: "Cross-referencing the return",
        narration: "Matching extracted values against each form line, comparing every line \
                    to the prior-year return, and checking withholding against the \
                    safe-harbor thresholds.",
        duration: Duration::from_millis(3200),
    },
    ThinkingStage {
        title: "Compiling findings",
        narration: "Grouping five findings into four categories and ranking them by \
                    severity for review.",
        duration: Duration::from_millis(2200),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StagePhase {
    Streaming,
    Pausing { remaining: Duration },
    Done,
}

/// Read-only render view of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    pub title: &'static str,
    pub text: String,
    pub active: bool,
    pub complete: bool,
}

/// One-shot staged narration. Each stage's words are revealed at an interval
/// of `stage duration / word count`; a fixed pause separates stages; the
/// sequence emits a single completion signal at the end.
#[derive(Debug, Clone)]
pub struct ThinkingSequence {
    stages: Vec<ThinkingStage>,
    current: usize,
    revealed_words: usize,
    toward_next_word: Duration,
    phase: StagePhase,
    complete_emitted: bool,
}

impl ThinkingSequence {
    pub fn new() -> Self {
        Self::with_stages(THINKING_STAGES.to_vec())
    }

    pub fn with_stages(stages: Vec<ThinkingStage>) -> Self {
        ThinkingSequence {
            stages,
            current: 0,
            revealed_words: 0,
            toward_next_word: Duration::ZERO,
            phase: StagePhase::Streaming,
            complete_emitted: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == StagePhase::Done
    }

    /// Advances virtual time. Returns `true` exactly once, on the call that
    /// finishes the final stage.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut remaining_dt = dt;
        loop {
            match self.phase {
                StagePhase::Done => return false,
                StagePhase::Streaming => {
                    let stage = self.stages[self.current];
                    let words = stage.word_count();
                    if self.revealed_words >= words {
                        self.phase = StagePhase::Pausing { remaining: STAGE_PAUSE };
                        continue;
                    }
                    let interval = stage.duration / words as u32;
                    let needed = interval.saturating_sub(self.toward_next_word);
                    if remaining_dt < needed {
                        self.toward_next_word += remaining_dt;
                        return false;
                    }
                    remaining_dt -= needed;
                    self.toward_next_word = Duration::ZERO;
                    self.revealed_words += 1;
                }
                StagePhase::Pausing { remaining } => {
                    if remaining_dt < remaining {
                        self.phase = StagePhase::Pausing { remaining: remaining - remaining_dt };
                        return false;
                    }
                    remaining_dt -= remaining;
                    if self.current + 1 >= self.stages.len() {
                        self.phase = StagePhase::Done;
                        if !self.complete_emitted {
                            self.complete_emitted = true;
                            return true;
                        }
                        return false;
                    }
                    self.current += 1;
                    self.revealed_words = 0;
                    self.toward_next_word = Duration::ZERO;
                    self.phase = StagePhase::Streaming;
                }
            }
        }
    }

    /// Render views for every stage: finished stages show full narration,
    /// the active stage shows the revealed word prefix, later stages are
    /// empty. `recap` renders everything as already complete, no timers.
    pub fn stage_views(&self, recap: bool) -> Vec<StageView> {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let done = recap
                    || self.phase == StagePhase::Done
                    || i < self.current;
                let active = !done && i == self.current;
                let text = if done {
                    stage.narration.split_whitespace().collect::<Vec<_>>().join(" ")
                } else if active {
                    stage
                        .narration
                        .split_whitespace()
                        .take(self.revealed_words)
                        .collect::<Vec<_>>()
                        .join(" ")
                } else {
                    String::new()
                };
                StageView { title: stage.title, text, active, complete: done }
            })
            .collect()
    }
}

impl Default for ThinkingSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct PendingReply {
    remaining: Duration,
    text: String,
}

/// Append-only chat log with fixed-latency canned replies. Each accepted
/// message schedules its own reply timer; replies resolve strictly in send
/// order, so a later reply never lands ahead of an earlier one.
#[derive(Debug, Clone, Default)]
pub struct ChatThread {
    messages: Vec<AgentMessage>,
    pending: VecDeque<PendingReply>,
}

impl ChatThread {
    pub fn messages(&self) -> &[AgentMessage] {
        &self.messages
    }

    /// True while any reply timer is outstanding; the UI shows the typing
    /// indicator in place of the next message.
    pub fn is_waiting(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Appends the user turn immediately and schedules its reply. Empty and
    /// whitespace-only input is rejected as a no-op.
    pub fn send(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.messages.push(AgentMessage::user(trimmed));
        self.pending.push_back(PendingReply {
            remaining: CHAT_REPLY_LATENCY,
            text: responses::select_response(trimmed).to_string(),
        });
        true
    }

    /// Advances all pending reply timers and appends any that expired, in
    /// send order.
    pub fn advance(&mut self, dt: Duration) {
        for reply in self.pending.iter_mut() {
            reply.remaining = reply.remaining.saturating_sub(dt);
        }
        while self
            .pending
            .front()
            .map(|r| r.remaining.is_zero())
            .unwrap_or(false)
        {
            let reply = self.pending.pop_front().expect("front checked above");
            self.messages.push(AgentMessage::assistant(reply.text));
        }
    }
}

/// What the assistant side panel is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantDisplayMode {
    #[default]
    Loading,
    Thinking,
    Report,
    /// The finished thinking trace, re-opened: all stages complete, no timers.
    Recap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_stages() -> Vec<ThinkingStage> {
        vec![
            ThinkingStage {
                title: "one",
                narration: "alpha beta gamma delta",
                duration: Duration::from_millis(400),
            },
            ThinkingStage {
                title: "two",
                narration: "epsilon zeta",
                duration: Duration::from_millis(200),
            },
        ]
    }

    #[test]
    fn words_stream_at_duration_over_word_count() {
        let mut seq = ThinkingSequence::with_stages(short_stages());
        // 4 words over 400ms -> one word per 100ms.
        assert!(!seq.advance(Duration::from_millis(99)));
        assert_eq!(seq.stage_views(false)[0].text, "");
        seq.advance(Duration::from_millis(1));
        assert_eq!(seq.stage_views(false)[0].text, "alpha");
        seq.advance(Duration::from_millis(250));
        assert_eq!(seq.stage_views(false)[0].text, "alpha beta gamma");
    }

    #[test]
    fn stages_advance_after_fixed_pause() {
        let mut seq = ThinkingSequence::with_stages(short_stages());
        seq.advance(Duration::from_millis(400));
        // Stage one fully revealed, still pausing: stage two not started.
        let views = seq.stage_views(false);
        assert_eq!(views[0].text, "alpha beta gamma delta");
        assert_eq!(views[1].text, "");
        // Pause elapses, second stage streams (2 words / 200ms = 100ms each).
        seq.advance(STAGE_PAUSE + Duration::from_millis(100));
        let views = seq.stage_views(false);
        assert!(views[0].complete);
        assert_eq!(views[1].text, "epsilon");
        assert!(views[1].active);
    }

    #[test]
    fn completion_signal_fires_exactly_once() {
        let mut seq = ThinkingSequence::with_stages(short_stages());
        assert!(!seq.advance(Duration::from_millis(400) + STAGE_PAUSE));
        // Finish stage two and its trailing pause in one large step.
        assert!(seq.advance(Duration::from_secs(5)));
        assert!(seq.is_complete());
        assert!(!seq.advance(Duration::from_secs(1)));
    }

    #[test]
    fn one_large_delta_can_complete_the_whole_sequence() {
        let mut seq = ThinkingSequence::with_stages(short_stages());
        assert!(seq.advance(Duration::from_secs(60)));
        let views = seq.stage_views(false);
        assert!(views.iter().all(|v| v.complete));
    }

    #[test]
    fn recap_renders_all_stages_complete_without_advancing() {
        let seq = ThinkingSequence::with_stages(short_stages());
        let views = seq.stage_views(true);
        assert!(views.iter().all(|v| v.complete && !v.active));
        assert_eq!(views[0].text, "alpha beta gamma delta");
    }

    #[test]
    fn chat_rejects_blank_input() {
        let mut chat = ChatThread::default();
        assert!(!chat.send(""));
        assert!(!chat.send("   \n\t"));
        assert!(chat.messages().is_empty());
        assert!(!chat.is_waiting());
    }

    #[test]
    fn chat_appends_user_immediately_and_reply_after_latency() {
        let mut chat = ChatThread::default();
        assert!(chat.send("What about the penalty?"));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, MessageRole::User);
        assert!(chat.is_waiting());

        chat.advance(CHAT_REPLY_LATENCY - Duration::from_millis(1));
        assert_eq!(chat.messages().len(), 1);
        chat.advance(Duration::from_millis(1));
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, MessageRole::Assistant);
        assert!(!chat.messages()[1].blocks.is_empty());
        assert!(!chat.is_waiting());
    }

    #[test]
    fn sequential_sends_keep_reply_order() {
        let mut chat = ChatThread::default();
        chat.send("wages?");
        chat.advance(CHAT_REPLY_LATENCY);
        chat.send("penalty?");
        chat.advance(CHAT_REPLY_LATENCY);

        let roles: Vec<MessageRole> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
        assert!(chat.messages()[1].text.contains("83,550"));
        assert!(chat.messages()[3].text.contains("safe harbor"));
    }

    #[test]
    fn concurrent_sends_never_interleave_replies_out_of_order() {
        let mut chat = ChatThread::default();
        chat.send("wages?");
        chat.advance(Duration::from_millis(300));
        chat.send("penalty?");
        chat.advance(CHAT_REPLY_LATENCY);

        let texts: Vec<&str> = chat.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[0], "wages?");
        assert_eq!(texts[1], "penalty?");
        // Both replies expired by now; reply(A) must precede reply(B).
        assert!(texts[2].contains("83,550"), "first reply answers the wages question");
        assert!(texts[3].contains("safe harbor"), "second reply answers the penalty question");
    }
}
