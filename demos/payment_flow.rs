//! Incoming Payment Flow
//!
//! This example guards the state of an incoming payment with transition rules
//! written in every accepted notation.
//!
//! Key concepts:
//! - Canonical rules and `(start, targets)` shorthands mix in one list
//! - Starts and targets may be typed states or raw names
//! - A lone `...` target allows any next state
//! - `qr_code_saved` is terminal and refuses every change
//! - Denials surface as typed errors the owner can report
//!
//! Run with: RUST_LOG=statefield=debug cargo run --example payment_flow

use statefield::core::{State, StateHistory, TransitionRule};
use statefield::rules::{RawRule, RawTarget, Token};
use statefield::slot::{GuardedStateSlot, StateField};
use statefield::{state_enum, TransitionError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

state_enum! {
    pub enum IncomingPaymentState {
        Start = "start": "Payment started",
        KassaInit = "init_data_received": "Init data received",
        KassaInitDataSaved = "init_data_saved": "Init data saved",
        KassaQrCode = "qr_code_received": "QR code received",
        KassaQrCodeSaved = "qr_code_saved": "Request GetQR and response saved",
        OneMoreStep = "one_more_step": "One more step not completed",
    }
}

use IncomingPaymentState::*;

// Payment entity
struct Payment {
    id: u64,
    state: GuardedStateSlot<IncomingPaymentState>,
    history: StateHistory<IncomingPaymentState>,
}

impl Payment {
    fn new(id: u64, field: &Arc<StateField<IncomingPaymentState>>) -> Self {
        Self {
            id,
            state: field.slot(),
            history: StateHistory::new(),
        }
    }

    fn set_state(&mut self, next: IncomingPaymentState) -> Result<(), TransitionError> {
        if let Some(transition) = self.state.assign(next)?.into_transition() {
            self.history = self.history.record(transition);
        }
        Ok(())
    }
}

fn payment_state_field() -> Result<StateField<IncomingPaymentState>, statefield::BuildError> {
    StateField::builder("state")
        .choices()
        .default(Start)
        .rule(TransitionRule::explicit(Start, [KassaInit]))
        .rule(RawRule::to(
            "init_data_received",
            [
                RawTarget::State(KassaInitDataSaved),
                RawTarget::State(KassaQrCode),
            ],
        ))
        .rule(RawRule::to(Token::State(KassaInitDataSaved), ["..."]))
        .rule(RawRule::to(
            Token::State(KassaQrCode),
            [RawTarget::State(KassaQrCodeSaved)],
        ))
        .rule(RawRule::terminal("qr_code_saved"))
        .rule(TransitionRule::any(OneMoreStep))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Incoming Payment Flow ===\n");

    let field = Arc::new(payment_state_field()?);

    println!("Declared states (max_length = {}):", field.max_length());
    for (name, label) in field.enumeration().choices() {
        println!("  {:<20} {}", name, label.unwrap_or("-"));
    }
    println!();

    let mut payment = Payment::new(1, &field);
    for next in [
        KassaInit,
        KassaInitDataSaved,
        OneMoreStep,
        KassaQrCode,
        KassaQrCode,
        KassaQrCodeSaved,
    ] {
        payment.set_state(next)?;
    }

    let path: Vec<&str> = payment
        .history
        .get_path()
        .into_iter()
        .map(|state| state.label().unwrap_or(state.name()))
        .collect();
    println!("Payment #{}: {}", payment.id, path.join(" -> "));

    // A saved QR code cannot be reopened
    if let Err(err) = payment.set_state(Start) {
        println!("Payment #{}: rejected [{}] {}", payment.id, err.error_code(), err);
    }

    // Skipping the init step is denied as well
    let mut skipping = Payment::new(2, &field);
    match skipping.set_state(KassaQrCode) {
        Ok(()) => println!("Payment #{}: unexpectedly advanced", skipping.id),
        Err(err) => println!("Payment #{}: rejected [{}] {}", skipping.id, err.error_code(), err),
    }
    println!(
        "Payment #{}: still {}",
        skipping.id,
        skipping.state.value().name()
    );

    Ok(())
}
