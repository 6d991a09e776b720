use crate::{lexer::Command, parser::Program};

use super::{Runtime, RuntimeError};

/// Fetch-execute loop over a [`Program`].
///
/// Only the instruction pointer lives here; cells and devices belong to the
/// [`Runtime`] so the same evaluator can pick up where it stopped after more
/// commands are appended to the program.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    /// Index of the next command to execute
    ip: usize,
    max_steps: Option<u64>,
}

impl Evaluator {
    pub fn new(max_steps: Option<u64>) -> Self {
        Self { ip: 0, max_steps }
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn reset(&mut self) {
        self.ip = 0;
    }

    /// Run until the instruction pointer falls off the end of the program.
    ///
    /// Every bracket reachable from `ip` must already be matched. On error the
    /// instruction pointer stays on the failing command so a later call retries it.
    pub fn run(&mut self, runtime: &mut Runtime, program: &Program) -> Result<u64, RuntimeError> {
        let mut steps = 0;
        while let Some(command) = program.get(self.ip) {
            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    return Err(RuntimeError::StepLimitExceeded { limit, ip: self.ip });
                }
            }
            self.step(runtime, program, command)?;
            steps += 1;
        }
        Ok(steps)
    }

    fn step(&mut self, runtime: &mut Runtime, program: &Program, command: Command) -> Result<(), RuntimeError> {
        match command {
            Command::Increment => runtime.tape_mut().advance(),
            Command::Decrement => runtime.tape_mut().retreat(),
            Command::DerefIncrement => runtime.tape_mut().increment(),
            Command::DerefDecrement => runtime.tape_mut().decrement(),
            Command::Write => runtime.write(self.ip)?,
            Command::Read => runtime.read(self.ip)?,
            Command::JumpStart => {
                if runtime.tape().value_is_zero() {
                    self.jump(program);
                }
            }
            Command::JumpEnd => {
                if !runtime.tape().value_is_zero() {
                    self.jump(program);
                }
            }
        }
        // after a jump this moves past the partner bracket
        self.ip += 1;
        Ok(())
    }

    fn jump(&mut self, program: &Program) {
        let target = program.jump_target(self.ip);
        debug_assert!(
            target.is_some(),
            "bracket at {} executed before its partner was parsed",
            self.ip
        );
        if let Some(target) = target {
            self.ip = target;
        }
    }
}
