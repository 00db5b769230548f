use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::draft::Draft;
use crate::auth::CredentialVerifier;
use crate::models::content::ContentDocument;

/// Tabs of the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    General,
    Experience,
    Skills,
    Portfolio,
    Performance,
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Wrong credential")]
    WrongCredential,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("A save is already in progress")]
    SaveInProgress,
}

/// An open edit: the scratch copy and the tab the owner is on.
#[derive(Debug)]
pub struct EditSession {
    pub draft: Draft,
    pub section: Section,
}

#[derive(Debug)]
enum Phase {
    Viewing,
    Authenticating,
    Editing(EditSession),
    /// The draft has been handed to the gateway; nothing else may save.
    Committing,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Viewing => "viewing",
            Phase::Authenticating => "authenticating",
            Phase::Editing(_) => "editing",
            Phase::Committing => "committing",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub phase: &'static str,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
}

/// The single owner's admin session.
///
/// `viewing -> authenticating -> editing -> committing -> viewing`, with
/// cancel returning to `viewing` from `authenticating` or `editing`. A login
/// issues a bearer token that stays valid after commit or cancel, so the
/// owner can reopen the editor without re-entering the secret, until logout.
pub struct AdminConsole {
    verifier: Arc<dyn CredentialVerifier>,
    phase: Phase,
    token: Option<Uuid>,
}

impl AdminConsole {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            verifier,
            phase: Phase::Viewing,
            token: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            phase: self.phase.name(),
            logged_in: self.token.is_some(),
            section: match &self.phase {
                Phase::Editing(session) => Some(session.section),
                _ => None,
            },
        }
    }

    /// Shows the credential prompt.
    pub fn begin_auth(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Viewing | Phase::Authenticating => {
                self.phase = Phase::Authenticating;
                Ok(())
            }
            _ => Err(self.invalid("begin authentication")),
        }
    }

    /// Checks `secret` and, on a match, opens an edit session over a clone of
    /// `live`. A mismatch leaves the console in `authenticating`.
    pub fn login(&mut self, secret: &str, live: &ContentDocument) -> Result<Uuid, SessionError> {
        if !matches!(self.phase, Phase::Authenticating) {
            return Err(self.invalid("log in"));
        }
        if !self.verifier.verify(secret) {
            warn!("Rejected admin login: wrong credential");
            return Err(SessionError::WrongCredential);
        }

        let token = Uuid::new_v4();
        self.token = Some(token);
        self.phase = Phase::Editing(EditSession {
            draft: Draft::from_snapshot(live),
            section: Section::default(),
        });
        info!("Admin logged in; edit session opened");
        Ok(token)
    }

    /// Opens a fresh edit session for an owner who is already logged in.
    pub fn reopen(&mut self, token: Option<&str>, live: &ContentDocument) -> Result<(), SessionError> {
        self.authorize(token)?;
        match self.phase {
            Phase::Viewing | Phase::Authenticating => {
                self.phase = Phase::Editing(EditSession {
                    draft: Draft::from_snapshot(live),
                    section: Section::default(),
                });
                Ok(())
            }
            Phase::Committing => Err(SessionError::SaveInProgress),
            Phase::Editing(_) => Err(self.invalid("reopen the editor")),
        }
    }

    pub fn session(&self, token: Option<&str>) -> Result<&EditSession, SessionError> {
        self.authorize(token)?;
        match &self.phase {
            Phase::Editing(session) => Ok(session),
            Phase::Committing => Err(SessionError::SaveInProgress),
            other => Err(SessionError::InvalidPhase {
                action: "read the draft",
                phase: other.name(),
            }),
        }
    }

    pub fn session_mut(&mut self, token: Option<&str>) -> Result<&mut EditSession, SessionError> {
        self.authorize(token)?;
        match &mut self.phase {
            Phase::Editing(session) => Ok(session),
            Phase::Committing => Err(SessionError::SaveInProgress),
            other => Err(SessionError::InvalidPhase {
                action: "edit",
                phase: other.name(),
            }),
        }
    }

    /// Takes the draft out for saving and blocks further edits and saves
    /// until `finish_commit`.
    pub fn begin_commit(&mut self, token: Option<&str>) -> Result<ContentDocument, SessionError> {
        self.authorize(token)?;
        match std::mem::replace(&mut self.phase, Phase::Committing) {
            Phase::Editing(session) => Ok(session.draft.into_document()),
            other => {
                self.phase = other;
                match self.phase {
                    Phase::Committing => Err(SessionError::SaveInProgress),
                    _ => Err(self.invalid("save")),
                }
            }
        }
    }

    pub fn finish_commit(&mut self) {
        if let Phase::Committing = self.phase {
            self.phase = Phase::Viewing;
        }
    }

    /// Closes the prompt or discards the draft. The live document is untouched.
    pub fn cancel(&mut self, token: Option<&str>) -> Result<(), SessionError> {
        match self.phase {
            Phase::Viewing => Ok(()),
            Phase::Authenticating => {
                self.phase = Phase::Viewing;
                Ok(())
            }
            Phase::Editing(_) => {
                self.authorize(token)?;
                self.phase = Phase::Viewing;
                info!("Edit session cancelled; draft discarded");
                Ok(())
            }
            Phase::Committing => Err(SessionError::SaveInProgress),
        }
    }

    /// Ends the login. Any open draft is discarded.
    pub fn logout(&mut self, token: Option<&str>) -> Result<(), SessionError> {
        self.authorize(token)?;
        if let Phase::Committing = self.phase {
            return Err(SessionError::SaveInProgress);
        }
        self.phase = Phase::Viewing;
        self.token = None;
        info!("Admin logged out");
        Ok(())
    }

    fn authorize(&self, token: Option<&str>) -> Result<(), SessionError> {
        let presented = token.and_then(|t| Uuid::parse_str(t).ok());
        match (self.token, presented) {
            (Some(expected), Some(got)) if expected == got => Ok(()),
            _ => Err(SessionError::Unauthenticated),
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidPhase {
            action,
            phase: self.phase.name(),
        }
    }
}
