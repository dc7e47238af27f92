use proptest::prelude::*;
use quickfuck::{Engine, FixedEngine, GrowableEngine};

/// Build a program from `ops` that never moves the pointer below 0 or to `width`.
fn bounded_program(ops: &[u8], width: usize) -> String {
    let mut pointer = 0usize;
    let mut program = String::new();
    for &op in ops {
        let op = b"+-<>.,"[op as usize % 6];
        match op {
            b'<' if pointer == 0 => continue,
            b'<' => pointer -= 1,
            b'>' if pointer + 1 >= width => continue,
            b'>' => pointer += 1,
            _ => {}
        }
        program.push(char::from(op));
    }
    program
}

proptest! {
    #[test]
    fn increments_wrap_modulo_256(n in 0usize..1024) {
        let mut engine = GrowableEngine::new("+".repeat(n));
        engine.interpret().unwrap();
        prop_assert_eq!(engine.value().unwrap() as usize, n % 256);
    }

    #[test]
    fn increment_then_decrement_is_identity(start in any::<u8>(), n in 0usize..600) {
        let mut engine = FixedEngine::new(format!("{}{}", "+".repeat(n), "-".repeat(n)), 1);
        engine.reset();
        engine.set_value(start).unwrap();
        engine.resume().unwrap();
        prop_assert_eq!(engine.value().unwrap(), start);
    }

    #[test]
    fn moving_right_grows_and_moving_left_never_shrinks(right in 0usize..200, left in 0usize..400) {
        let mut engine = GrowableEngine::new(format!("{}{}", ">".repeat(right), "<".repeat(left)));
        engine.interpret().unwrap();
        prop_assert_eq!(engine.tape_len(), right + 1);
        prop_assert_eq!(engine.cell_pointer(), right.saturating_sub(left));
    }

    #[test]
    fn fixed_matches_growable_on_bounded_programs(
        ops in prop::collection::vec(any::<u8>(), 0..200),
        width in 1usize..16,
        input in "[ -~]{0,40}",
    ) {
        let program = bounded_program(&ops, width);

        let mut growable = GrowableEngine::new(program.as_str());
        let mut fixed = FixedEngine::new(program.as_str(), width);
        let growable_result = growable.interpret_with_input(&input);
        let fixed_result = fixed.interpret_with_input(&input);

        prop_assert_eq!(growable_result.is_ok(), fixed_result.is_ok());
        prop_assert_eq!(growable.output(), fixed.output());
        prop_assert_eq!(growable.cell_pointer(), fixed.cell_pointer());
        let grown = growable.tape();
        prop_assert_eq!(grown, &fixed.tape()[..grown.len()]);
        prop_assert!(fixed.tape()[grown.len()..].iter().all(|&cell| cell == 0));
    }

    #[test]
    fn repeated_runs_are_identical(
        ops in prop::collection::vec(any::<u8>(), 0..120),
        input in "[ -~]{0,20}",
    ) {
        let program = bounded_program(&ops, 8);
        let mut engine = GrowableEngine::new(program);

        let first = engine.interpret_with_input(&input).ok();
        let first_tape = engine.tape().to_vec();
        let first_output = engine.output().to_vec();

        let second = engine.interpret_with_input(&input).ok();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_tape, engine.tape().to_vec());
        prop_assert_eq!(first_output, engine.output().to_vec());
    }
}
