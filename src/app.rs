//! Command handlers: one function per CLI subcommand, each driving a
//! [`Session`] against the configured service.

use std::io::{self, BufRead};

use anyhow::Result;
use tracing::debug;

use crate::api::{EvaluationApi, EvaluationClient, FormData, FormField};
use crate::error::AppError;
use crate::session::{Session, Transition, ViewState};
use crate::ui::{Spinner, Ui, submit_label};

/// A user choice in the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(FormField),
    Submit,
    Retry,
    Reset,
    RefreshHealth,
    History,
    Quit,
}

pub fn parse_action(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" => Some(Action::Edit(FormField::JobPost)),
        "2" => Some(Action::Edit(FormField::Qualification)),
        "3" => Some(Action::Edit(FormField::Expertise)),
        "s" | "submit" => Some(Action::Submit),
        "r" | "retry" => Some(Action::Retry),
        "n" | "new" => Some(Action::Reset),
        "h" | "health" => Some(Action::RefreshHealth),
        "l" | "history" => Some(Action::History),
        "q" | "quit" | "exit" => Some(Action::Quit),
        _ => None,
    }
}

/// Menu line for the actions available in `view`.
pub fn menu(view: &ViewState) -> &'static str {
    match view {
        ViewState::Form => "[1-3] edit  [s] submit  [h] health  [l] history  [q] quit",
        ViewState::Loading => "",
        ViewState::Success(_) => "[n] evaluate another teacher  [l] history  [q] quit",
        ViewState::Error(_) => "[1-3] edit  [r] try again  [h] health  [l] history  [q] quit",
    }
}

/// `health`: returns whether the service is ready.
pub async fn health(client: EvaluationClient) -> Result<bool> {
    let mut session = Session::new(client);
    let health = session.mount().await;
    Ui::new().health(health);
    Ok(health.is_healthy)
}

/// `info`: prints the service banner.
pub async fn info(client: &EvaluationClient) -> Result<()> {
    let home = client.home().await?;
    println!("{}", home.message);
    Ok(())
}

/// `evaluate`: one submission, no prompts.
pub async fn evaluate(client: EvaluationClient, form: FormData, json: bool) -> Result<(), AppError> {
    let mut session = Session::new(client);
    let ui = Ui::new();

    session.mount().await;
    for field in FormField::ALL {
        session.set_field(field, form.get(field));
    }

    let transition = submit_with_spinner(&mut session, !json).await;
    debug!(?transition, "evaluation settled");

    match (transition, session.view()) {
        (Transition::Succeeded, ViewState::Success(result)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result.0)?);
            } else {
                ui.view(session.view());
            }
            Ok(())
        }
        (_, ViewState::Error(message)) => Err(AppError::Evaluation(message.clone())),
        _ => {
            if !json {
                ui.health(session.health());
            }
            Err(AppError::ApiUnavailable)
        }
    }
}

/// `interactive`: the form session loop on stdin.
pub async fn interactive(client: EvaluationClient) -> Result<()> {
    let mut session = Session::new(client);
    let ui = Ui::new();

    ui.header();
    session.mount().await;
    ui.health(session.health());

    let mut input = io::stdin().lock();
    run_session(&mut session, &ui, &mut input).await
}

fn render<A: EvaluationApi>(ui: &Ui, session: &Session<A>) {
    ui.view(session.view());
    if session.view().is_editable() {
        ui.form(session.form(), session.health());
    }
    println!("{}", menu(session.view()));
}

/// Read actions from `input` until quit or end of input.
async fn run_session<A: EvaluationApi>(
    session: &mut Session<A>,
    ui: &Ui,
    input: &mut impl BufRead,
) -> Result<()> {
    loop {
        render(ui, session);

        let Some(line) = ui.prompt(input, ">")? else {
            debug!("input closed");
            break;
        };
        let Some(action) = parse_action(&line) else {
            ui.notice("Unknown choice.");
            continue;
        };

        match action {
            Action::Quit => break,
            Action::Edit(field) => {
                if !session.view().is_editable() {
                    ui.notice("Fields can't be edited right now.");
                    continue;
                }
                let label = format!("{} ({}):", field.label(), field.placeholder());
                let Some(value) = ui.prompt(input, &label)? else {
                    break;
                };
                session.set_field(field, value.trim());
            }
            Action::Submit => {
                if !session.view().is_editable() {
                    ui.notice("Nothing to submit.");
                    continue;
                }
                if submit_with_spinner(session, true).await == Transition::Ignored {
                    ui.notice(submit_label(session.health()));
                }
            }
            Action::Retry => {
                if !matches!(session.view(), ViewState::Error(_)) {
                    ui.notice("Nothing to retry.");
                    continue;
                }
                let spinner = session.form().is_complete().then(Spinner::start);
                session.retry().await;
                if let Some(s) = spinner {
                    s.finish();
                }
            }
            Action::Reset => {
                if !session.reset() {
                    ui.notice("Nothing to reset.");
                }
            }
            Action::RefreshHealth => {
                session.refresh_health().await;
                ui.health(session.health());
            }
            Action::History => ui.history(session.history()),
        }
    }

    Ok(())
}

/// Submit, showing the spinner only when the request will actually be sent.
async fn submit_with_spinner<A: EvaluationApi>(session: &mut Session<A>, show: bool) -> Transition {
    let spinner = (show && session.submission_ready()).then(Spinner::start);
    let transition = session.submit().await;
    if let Some(s) = spinner {
        s.finish();
    }
    transition
}
