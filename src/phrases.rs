//! Loading phrases shown while the assistant is busy
//!
//! [`PhraseCycler`] derives the current phrase from two inputs: whether work
//! is in progress and whether the user is being asked to confirm something.
//! Only the "busy, not waiting" state runs a timer, and that timer is
//! cancelled on every state change and on drop.

use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Phrases rotated while busy. The first one is shown when idle.
pub static WITTY_LOADING_PHRASES: &[&str] = &[
    "Running npm install (pray for me)...",
    "Shipping features straight to prod (YOLO)...",
    "Fixing semicolons one pixel at a time...",
    "Mapping through undefined...",
    "Consulting Stack Overflow shamans...",
    "Brewing fresh JavaScript... now decaffeinated.",
    "Don’t rush—compilers hate that...",
    "Counting closing brackets...",
    "Searching for the missing semicolon...",
    "Lubricating the build pipeline...",
    "It’s not a bug, it’s legacy behavior...",
    "Have you tried turning Git off and on again?",
    "Flipping the USB cable again...",
    "Rewriting in Rust because reasons...",
    "Trying to quit Vim... still trying...",
    "Commiting crimes against CSS...",
    "Pushing to prod without tests...",
    "Running make me_a_sandwich... permission denied.",
    "Unit testing... my patience.",
    "Segfaulting in style...",
    "Training on your vibes… gradient descent in progress...",
    "Fine-tuning my sarcasm layer...",
    "Hallucinating a witty response...",
    "Adjusting the bias... and variance...",
    "Checking GPU temps... too hot for this joke.",
    "My other process is still in training...",
    "Calibrating humor model... loss not converging.",
    "Fetching embeddings from the meme database...",
    "Prompt engineering my way out of this...",
    "Hallucinated an answer… looks legit.",
    "Running out of tokens... insert coin to continue...",
    "Quantizing my jokes to 4-bit...",
    "Waiting for the attention layer to notice you...",
    "Beam search for the funniest response...",
    "Distilling humor from a larger comedian...",
    "Aligning with human preference... please clap.",
    "Overfitting to your sense of humor...",
    "Running RLHF: Reinforcement Learning from Hilarious Feedback...",
    "Sampling with temperature=1.5... things may get weird.",
    "Top-k filtering my punchlines...",
    "Applying dropout... on unfunny jokes.",
    "Sharding my personality across GPUs...",
    "Loading weights... mostly dad jokes.",
    "Debugging hallucinations... or am I?",
    "Self-supervised laughter incoming...",
    "My loss is still high, but my vibes are immaculate.",
    "Caching embeddings... mostly cat memes.",
    "Running out of VRAM... moving wit to CPU...",
    "Evaluating perplexity of this punchline...",
    "Error 429: Too Many Laughs.",
    "Loading LLM humor... may contain hallucinations.",
    "Blowing on the GPU cartridge...",
    "Loading... while(1) { barrelRoll(); }",
    "Respawning humor.exe...",
    "Waiting for respawn()... still loading.",
    "The cake is still a 404...",
    "Doing the Kessel Run in 12 queries...",
    "Mining Bitcoin... kidding (or am I?)",
    "Petting the AI hamsters running my clusters...",
    "Unlocking hidden achievements...",
    "Finding loot in stacktrace.txt...",
    "Cross-validating my punchlines...",
    "Performing zero-shot humor transfer...",
    "Gradient exploding… like my deadlines.",
    "Hallucinating stack traces...",
    "Parameter-efficient jokes loading...",
    "Checking alignment… nope, still chaotic.",
    "Deploying sarcasm model to production...",
    "Evaluating inference speed of this joke...",
    "Pre-training on 4chan… oh no.",
    "Warming up transformers... not the robots.",
    "Waiting for the context window to remember this...",
    "Oops, truncated at 8k tokens...",
    "Running on vibes per second...",
    "Batching laughs with inflight chuckles...",
    "My GPU ran out of VRAM, switching to human RAM...",
    "Too many epochs, not enough coffee.",
    "Reinforcing humor until convergence...",
    "Scaling wit horizontally... but my brain is single-threaded.",
    "Just hallucinated a stack trace for your soul...",
];

/// Time between phrase changes while busy.
pub const PHRASE_CHANGE_INTERVAL: Duration = Duration::from_secs(15);

/// Phrase shown while waiting on the user.
pub const WAITING_PHRASE: &str = "Waiting for user confirmation...";

fn idle_phrase() -> &'static str {
    WITTY_LOADING_PHRASES.first().copied().unwrap_or_default()
}

fn random_phrase() -> &'static str {
    WITTY_LOADING_PHRASES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_else(idle_phrase)
}

/// Current loading phrase, driven by `(active, waiting)`
#[derive(Debug)]
pub struct PhraseCycler {
    phrase: Arc<watch::Sender<&'static str>>,
    rotation: Option<JoinHandle<()>>,
    active: bool,
    waiting: bool,
}

impl Default for PhraseCycler {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseCycler {
    /// Idle cycler showing the first phrase
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(idle_phrase());
        Self {
            phrase: Arc::new(tx),
            rotation: None,
            active: false,
            waiting: false,
        }
    }

    /// The phrase to show right now
    #[must_use]
    pub fn current(&self) -> &'static str {
        *self.phrase.borrow()
    }

    /// Whether a rotation timer is running
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotation.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Update the inputs. Nothing happens if they did not change.
    ///
    /// Starting a rotation needs a Tokio runtime; without one the phrase is
    /// still re-rolled once but never rotates.
    pub fn set_state(&mut self, active: bool, waiting: bool) {
        if (active, waiting) == (self.active, self.waiting) {
            return;
        }
        self.active = active;
        self.waiting = waiting;
        self.cancel();

        if waiting {
            self.phrase.send_replace(WAITING_PHRASE);
        } else if active {
            self.phrase.send_replace(random_phrase());
            self.start_rotation();
        } else {
            self.phrase.send_replace(idle_phrase());
        }
    }

    fn start_rotation(&mut self) {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime; loading phrase will not rotate");
            return;
        };

        let phrase = Arc::clone(&self.phrase);
        self.rotation = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(PHRASE_CHANGE_INTERVAL);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                phrase.send_replace(random_phrase());
            }
        }));
        debug!("Phrase rotation started");
    }

    fn cancel(&mut self) {
        if let Some(rotation) = self.rotation.take() {
            rotation.abort();
            debug!("Phrase rotation cancelled");
        }
    }
}

impl Drop for PhraseCycler {
    fn drop(&mut self) {
        self.cancel();
    }
}
