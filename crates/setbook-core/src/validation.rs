// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request validation.
//!
//! Validation runs before any handler reaches storage and reports the first
//! offending field as a [`CoreError::ValidationError`].

use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{
    AddExerciseLogRequest, CompleteSessionRequest, ExercisePrescription, ExerciseUpdate,
    ListSessionsFilter, MAX_PAGE_LIMIT, NewExercise, NewWorkout, NewWorkoutExercise, SetInput,
    StartSessionRequest, WorkoutExerciseUpdate, WorkoutUpdate,
};

/// Minimum length of exercise and workout names.
pub const MIN_NAME_LEN: usize = 3;

/// Types that can check their own field constraints.
pub trait Validate {
    /// Return the first violated constraint, if any.
    fn validate(&self) -> Result<()>;
}

/// Require `value` to be a UUID.
pub fn validate_id(field: &str, value: &str) -> Result<()> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| CoreError::validation(field, format!("'{}' is not a valid UUID", value)))
}

/// Require a trimmed name of at least [`MIN_NAME_LEN`] characters.
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().chars().count() < MIN_NAME_LEN {
        return Err(CoreError::validation(
            field,
            format!("must be at least {} characters", MIN_NAME_LEN),
        ));
    }
    Ok(())
}

fn validate_weight(field: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(CoreError::validation(field, "must be non-negative"));
    }
    Ok(())
}

fn validate_positive(field: &str, value: i32) -> Result<()> {
    if value < 1 {
        return Err(CoreError::validation(field, "must be positive"));
    }
    Ok(())
}

fn validate_rest(field: &str, rest: i32) -> Result<()> {
    if rest < 0 {
        return Err(CoreError::validation(field, "must be non-negative"));
    }
    Ok(())
}

fn validate_sets(prefix: &str, sets: &[SetInput]) -> Result<()> {
    for (i, set) in sets.iter().enumerate() {
        validate_weight(&format!("{}[{}].weight", prefix, i), set.weight)?;
        validate_positive(&format!("{}[{}].reps", prefix, i), set.reps)?;
    }
    Ok(())
}

impl Validate for NewExercise {
    fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)
    }
}

impl Validate for ExerciseUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        Ok(())
    }
}

impl Validate for NewWorkout {
    fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)
    }
}

impl Validate for WorkoutUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        Ok(())
    }
}

impl Validate for NewWorkoutExercise {
    fn validate(&self) -> Result<()> {
        validate_id("exerciseId", &self.exercise_id)?;
        validate_positive("order", self.order)?;
        validate_positive("series", self.series)?;
        validate_positive("reps", self.reps)?;
        validate_weight("weight", self.weight)?;
        validate_rest("rest", self.rest)
    }
}

impl Validate for Vec<NewWorkoutExercise> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl Validate for WorkoutExerciseUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(order) = self.order {
            validate_positive("order", order)?;
        }
        if let Some(series) = self.series {
            validate_positive("series", series)?;
        }
        if let Some(reps) = self.reps {
            validate_positive("reps", reps)?;
        }
        if let Some(weight) = self.weight {
            validate_weight("weight", weight)?;
        }
        if let Some(rest) = self.rest {
            validate_rest("rest", rest)?;
        }
        Ok(())
    }
}

fn validate_prescription(index: usize, line: &ExercisePrescription) -> Result<()> {
    let prefix = format!("exercises[{}]", index);
    validate_id(&format!("{}.id", prefix), &line.workout_exercise_id)?;
    validate_id(&format!("{}.exerciseId", prefix), &line.exercise_id)?;
    validate_sets(&format!("{}.series", prefix), &line.series)?;
    if let Some(rest) = line.rest {
        validate_rest(&format!("{}.rest", prefix), rest)?;
    }
    Ok(())
}

impl Validate for StartSessionRequest {
    fn validate(&self) -> Result<()> {
        if let Some(workout_id) = &self.workout_id {
            validate_id("workoutId", workout_id)?;
        }
        for (i, line) in self.exercises.iter().enumerate() {
            validate_prescription(i, line)?;
        }
        Ok(())
    }
}

impl Validate for CompleteSessionRequest {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Validate for AddExerciseLogRequest {
    fn validate(&self) -> Result<()> {
        validate_id("exerciseId", &self.exercise_id)?;
        validate_id("workoutExerciseId", &self.workout_exercise_id)?;
        validate_sets("series", &self.series)?;
        if let Some(rest) = self.rest {
            validate_rest("rest", rest)?;
        }
        Ok(())
    }
}

impl Validate for ListSessionsFilter {
    fn validate(&self) -> Result<()> {
        if let Some(workout_id) = &self.workout_id {
            validate_id("workoutId", workout_id)?;
        }
        let limit = self.limit();
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(CoreError::validation(
                "limit",
                format!("must be between 1 and {}", MAX_PAGE_LIMIT),
            ));
        }
        if self.page() < 1 {
            return Err(CoreError::validation("page", "must be positive"));
        }
        if self.checked_offset().is_none() {
            return Err(CoreError::validation("page", "is too large"));
        }
        Ok(())
    }
}
