//! Ordering contract for children within a parent collection (interfaces and
//! services within a host). Positions in a request must be all specified
//! (sequential from 0) or all omitted (existing children keep their
//! positions, new children append).

use crate::shared::types::api::ApiError;
use std::collections::HashMap;
use uuid::Uuid;

/// Entities carrying a resolved position.
pub trait Positioned {
    fn position(&self) -> i32;

    fn set_position(&mut self, position: i32);

    /// Entity ID, used to match inputs against existing children.
    fn id(&self) -> Uuid;

    /// Name used in error messages ("interface", "service").
    fn entity_name() -> &'static str;
}

/// Request inputs carrying an optional position.
pub trait PositionedInput {
    fn position(&self) -> Option<i32>;

    fn set_position(&mut self, position: i32);

    fn id(&self) -> Uuid;
}

/// Positions must form 0..n with no gaps or duplicates. Order of the slice
/// itself does not matter.
pub fn validate_sequential_positions(positions: &[i32], entity_name: &str) -> Result<(), ApiError> {
    if positions.is_empty() {
        return Ok(());
    }

    let mut sorted = positions.to_vec();
    sorted.sort();

    for window in sorted.windows(2) {
        if window[0] == window[1] {
            return Err(ApiError::bad_request(&format!(
                "Duplicate {} position: {}. Each {} must have a unique position.",
                entity_name, window[0], entity_name
            )));
        }
    }

    for (expected, actual) in sorted.iter().enumerate() {
        if *actual != expected as i32 {
            return Err(ApiError::bad_request(&format!(
                "{} positions must be sequential starting from 0. \
                 Expected position {} but found {}.",
                capitalize(entity_name),
                expected,
                actual
            )));
        }
    }

    Ok(())
}

/// Validates inputs whose positions are already all specified.
pub fn validate_input_positions<T: PositionedInput>(
    inputs: &[T],
    entity_name: &str,
) -> Result<(), ApiError> {
    let positions: Vec<i32> = inputs.iter().filter_map(|i| i.position()).collect();
    validate_sequential_positions(&positions, entity_name)
}

/// Resolves optional positions on request inputs, then validates.
///
/// All specified: validated as sequential. All omitted: inputs matching an
/// existing child keep that child's position, new inputs append after the
/// existing set. A mix of specified and omitted is rejected.
pub fn resolve_and_validate_input_positions<T: PositionedInput, E: Positioned>(
    inputs: &mut [T],
    existing: &[E],
    entity_name: &str,
) -> Result<(), ApiError> {
    if inputs.is_empty() {
        return Ok(());
    }

    let specified_count = inputs.iter().filter(|i| i.position().is_some()).count();

    if specified_count > 0 && specified_count < inputs.len() {
        return Err(ApiError::bad_request(&format!(
            "{} positions must be all specified or all omitted. \
             Found {} with positions and {} without.",
            capitalize(entity_name),
            specified_count,
            inputs.len() - specified_count
        )));
    }

    if specified_count == inputs.len() {
        let positions: Vec<i32> = inputs.iter().filter_map(|i| i.position()).collect();
        return validate_sequential_positions(&positions, entity_name);
    }

    let existing_by_id: HashMap<Uuid, i32> =
        existing.iter().map(|e| (e.id(), e.position())).collect();

    let mut next_pos = existing.len() as i32;

    for input in inputs.iter_mut() {
        if let Some(&pos) = existing_by_id.get(&input.id()) {
            input.set_position(pos);
        } else {
            input.set_position(next_pos);
            next_pos += 1;
        }
    }

    Ok(())
}

/// Reassigns sequential positions after deletions leave gaps.
/// Returns true if anything changed.
pub fn renumber_positions<T: Positioned>(entities: &mut [T]) -> bool {
    if entities.is_empty() {
        return false;
    }

    entities.sort_by_key(|e| e.position());

    let mut changed = false;
    for (i, entity) in entities.iter_mut().enumerate() {
        let expected = i as i32;
        if entity.position() != expected {
            entity.set_position(expected);
            changed = true;
        }
    }

    changed
}

/// Next free position: children are kept dense, so this is just the count.
pub fn next_position<T>(existing: &[T]) -> i32 {
    existing.len() as i32
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: Uuid,
        position: i32,
    }

    impl TestEntity {
        fn new(position: i32) -> Self {
            Self {
                id: Uuid::new_v4(),
                position,
            }
        }
    }

    impl Positioned for TestEntity {
        fn position(&self) -> i32 {
            self.position
        }
        fn set_position(&mut self, p: i32) {
            self.position = p;
        }
        fn id(&self) -> Uuid {
            self.id
        }
        fn entity_name() -> &'static str {
            "test entity"
        }
    }

    #[derive(Clone, Debug)]
    struct TestInput {
        id: Uuid,
        position: Option<i32>,
    }

    impl TestInput {
        fn new(position: Option<i32>) -> Self {
            Self {
                id: Uuid::new_v4(),
                position,
            }
        }

        fn with_id(id: Uuid, position: Option<i32>) -> Self {
            Self { id, position }
        }
    }

    impl PositionedInput for TestInput {
        fn position(&self) -> Option<i32> {
            self.position
        }
        fn set_position(&mut self, position: i32) {
            self.position = Some(position);
        }
        fn id(&self) -> Uuid {
            self.id
        }
    }

    #[test]
    fn test_sequential_accepts_empty_and_unordered() {
        assert!(validate_sequential_positions(&[], "test").is_ok());
        assert!(validate_sequential_positions(&[0], "test").is_ok());
        assert!(validate_sequential_positions(&[0, 1, 2], "test").is_ok());
        assert!(validate_sequential_positions(&[2, 0, 1], "test").is_ok());
    }

    #[test]
    fn test_sequential_rejects_duplicates() {
        let result = validate_sequential_positions(&[0, 1, 1], "test");
        assert!(result.unwrap_err().message.contains("Duplicate"));
    }

    #[test]
    fn test_sequential_rejects_gaps_and_offsets() {
        assert!(validate_sequential_positions(&[0, 2, 3], "test").is_err());
        assert!(validate_sequential_positions(&[1, 2, 3], "test").is_err());
    }

    #[test]
    fn test_validate_input_positions_all_specified() {
        let inputs = vec![
            TestInput::new(Some(0)),
            TestInput::new(Some(1)),
            TestInput::new(Some(2)),
        ];
        assert!(validate_input_positions(&inputs, "test").is_ok());
    }

    #[test]
    fn test_resolve_all_omitted_on_create_assigns_in_order() {
        let mut inputs = vec![
            TestInput::new(None),
            TestInput::new(None),
            TestInput::new(None),
        ];
        let existing: Vec<TestEntity> = vec![];

        assert!(resolve_and_validate_input_positions(&mut inputs, &existing, "test").is_ok());

        assert_eq!(inputs[0].position, Some(0));
        assert_eq!(inputs[1].position, Some(1));
        assert_eq!(inputs[2].position, Some(2));
    }

    #[test]
    fn test_resolve_preserves_existing_and_appends_new() {
        let existing = vec![TestEntity::new(0), TestEntity::new(1)];
        let mut inputs = vec![
            TestInput::with_id(existing[1].id, None),
            TestInput::with_id(existing[0].id, None),
            TestInput::new(None),
        ];

        assert!(resolve_and_validate_input_positions(&mut inputs, &existing, "test").is_ok());

        assert_eq!(inputs[0].position, Some(1));
        assert_eq!(inputs[1].position, Some(0));
        // New child appended after the existing set
        assert_eq!(inputs[2].position, Some(2));
    }

    #[test]
    fn test_resolve_all_specified_invalid_is_rejected() {
        let mut inputs = vec![TestInput::new(Some(0)), TestInput::new(Some(2))];
        let existing: Vec<TestEntity> = vec![];

        let result = resolve_and_validate_input_positions(&mut inputs, &existing, "test");
        assert!(result.unwrap_err().message.contains("sequential"));
    }

    #[test]
    fn test_resolve_mixed_is_rejected() {
        let mut inputs = vec![TestInput::new(Some(0)), TestInput::new(None)];
        let existing: Vec<TestEntity> = vec![];

        let result = resolve_and_validate_input_positions(&mut inputs, &existing, "test");
        assert!(
            result
                .unwrap_err()
                .message
                .contains("all specified or all omitted")
        );
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut entities = vec![TestEntity::new(5), TestEntity::new(0), TestEntity::new(2)];

        assert!(renumber_positions(&mut entities));

        entities.sort_by_key(|e| e.position());
        assert_eq!(entities[0].position(), 0);
        assert_eq!(entities[1].position(), 1);
        assert_eq!(entities[2].position(), 2);
    }

    #[test]
    fn test_renumber_noop_when_already_dense() {
        let mut entities = vec![TestEntity::new(0), TestEntity::new(1)];
        assert!(!renumber_positions(&mut entities));
    }

    #[test]
    fn test_next_position() {
        let entities = vec![TestEntity::new(0), TestEntity::new(1)];
        assert_eq!(next_position(&entities), 2);
        assert_eq!(next_position::<TestEntity>(&[]), 0);
    }
}
