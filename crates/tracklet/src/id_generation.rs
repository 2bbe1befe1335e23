//! Collision-checked issue ID generation.
//!
//! IDs are random (version 4) UUIDs in lowercase hyphenated form, e.g.
//! `6f1c2e9a-3b4d-4e5f-8a7b-0c1d2e3f4a5b`. Randomness alone makes collisions
//! vanishingly unlikely; the generator additionally remembers every ID it has
//! seen so a duplicate can never be handed out.
//!
//! # Example
//!
//! ```
//! use tracklet::id_generation::IdGenerator;
//!
//! let mut generator = IdGenerator::new();
//! let id = generator.generate().unwrap();
//! assert_eq!(id.as_str().len(), 36);
//! ```

use crate::domain::IssueId;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

const MAX_ATTEMPTS: u32 = 16;

/// Errors that can occur during ID generation
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Every attempt produced an ID that was already taken
    #[error("Unable to generate unique ID after {attempts} attempts")]
    CollisionExhausted {
        /// Number of attempts made
        attempts: u32,
    },
}

/// ID generator with collision detection
///
/// Create one per operation and register the IDs of the loaded collection
/// before generating.
#[derive(Debug, Default)]
pub struct IdGenerator {
    existing_ids: HashSet<String>,
}

impl IdGenerator {
    /// Create a generator with no known IDs
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that avoids all of `ids`
    pub fn with_existing<'a>(ids: impl IntoIterator<Item = &'a IssueId>) -> Self {
        let mut generator = Self::new();
        for id in ids {
            generator.register_id(id);
        }
        generator
    }

    /// Register an existing ID to prevent collisions
    pub fn register_id(&mut self, id: &IssueId) {
        self.existing_ids.insert(id.as_str().to_string());
    }

    /// Generate a new unique ID
    ///
    /// # Errors
    ///
    /// Returns [`IdGenerationError::CollisionExhausted`] if no unused ID could
    /// be produced within the attempt budget.
    pub fn generate(&mut self) -> Result<IssueId, IdGenerationError> {
        self.generate_with(|| Uuid::new_v4().to_string())
    }

    fn generate_with(
        &mut self,
        mut candidate: impl FnMut() -> String,
    ) -> Result<IssueId, IdGenerationError> {
        for attempt in 0..MAX_ATTEMPTS {
            let id = candidate();
            if self.existing_ids.insert(id.clone()) {
                return Ok(IssueId::new(id));
            }
            warn!(attempt, id = %id, "Generated ID collided with an existing issue, retrying");
        }

        Err(IdGenerationError::CollisionExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}
