//! Per-navigation cancellation
//!
//! Every committed navigation bumps a generation counter. Work started under an
//! older generation sees its token cancelled and stops instead of delivering
//! results for a page that is no longer shown.

use std::future::Future;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Navigation superseded")]
pub struct Cancelled;

pub struct NavigationScope {
    generation: watch::Sender<u64>,
}

impl Default for NavigationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationScope {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Cancel every token issued so far
    pub fn advance(&self) -> u64 {
        self.generation.send_modify(|generation| *generation += 1);
        self.generation()
    }

    /// Token bound to the current generation
    pub fn token(&self) -> NavigationToken {
        NavigationToken {
            generation: self.generation(),
            rx: Some(self.generation.subscribe()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NavigationToken {
    generation: u64,
    rx: Option<watch::Receiver<u64>>,
}

impl NavigationToken {
    /// Token that is never cancelled
    pub fn detached() -> Self {
        Self {
            generation: 0,
            rx: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        match &self.rx {
            Some(rx) => *rx.borrow() != self.generation,
            None => false,
        }
    }

    /// Resolves once the token is cancelled; pending forever for detached tokens
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        loop {
            if *rx.borrow_and_update() != self.generation {
                return;
            }
            if rx.changed().await.is_err() {
                // Scope dropped: nothing can cancel us anymore
                return std::future::pending().await;
            }
        }
    }

    /// Drive `fut` unless the token is cancelled first
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            output = fut => Ok(output),
        }
    }
}
