use std::sync::Arc;

use crate::error::{Error, Result};
use crate::parser::{BinaryOp, Expression, LogicalOp, Program, Statement, UnaryOp};
use crate::runtime::{Builtin, Environment, OutputSink, Value};

/// Tree-walking evaluator for Scribble programs
///
/// Owns the environment for one run and writes all program output through
/// the injected sink. Every syntax-tree variant has exactly one evaluation
/// rule; the matches below are exhaustive, so a new variant fails to compile
/// rather than being silently ignored.
pub struct Evaluator {
    /// Variable environment (public so embedders can inspect state after a run)
    pub env: Environment,
    /// Destination for program output
    sink: Arc<dyn OutputSink>,
}

impl Evaluator {
    /// Creates an evaluator with a fresh environment
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Evaluator {
            env: Environment::new(),
            sink,
        }
    }

    /// Executes a program and returns the last statement's value
    ///
    /// Returns `Unit` for an empty program. On error the environment is left
    /// with exactly the scopes that were open before the failing block.
    pub fn execute(&mut self, program: &Program) -> Result<Value> {
        let mut last_val = Value::Unit;

        for statement in &program.statements {
            last_val = self.execute_statement(statement)?;
        }

        Ok(last_val)
    }

    fn execute_statement(&mut self, stmt: &Statement) -> Result<Value> {
        match stmt {
            Statement::Expression(expr) => self.evaluate_expression(expr),

            Statement::Block { statements } => {
                self.env.enter_scope();
                let result = self.execute_block_body(statements);
                // the scope is popped on the error path too
                self.env.exit_scope();
                result
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let selected = self.evaluate_expression(condition)?.as_bool()?;
                if selected {
                    self.execute_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(Value::Unit)
                }
            }

            Statement::While { condition, body } => {
                // no implicit iteration cap; termination is the program's concern
                while self.evaluate_expression(condition)?.as_bool()? {
                    self.execute_statement(body)?;
                }
                Ok(Value::Unit)
            }
        }
    }

    fn execute_block_body(&mut self, statements: &[Statement]) -> Result<Value> {
        let mut last_val = Value::Unit;
        for statement in statements {
            last_val = self.execute_statement(statement)?;
        }
        Ok(last_val)
    }

    fn evaluate_expression(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::IntLiteral(n) => Ok(Value::Int(*n)),
            Expression::StringLiteral(s) => Ok(Value::String(s.clone())),
            Expression::BoolLiteral(b) => Ok(Value::Bool(*b)),

            Expression::Variable(name) => self.env.get(name),

            Expression::Assign { name, value } => {
                let val = self.evaluate_expression(value)?;
                self.env.assign(name, val.clone())?;
                Ok(val)
            }

            Expression::Binary { op, left, right } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                self.apply_binary(*op, left_val, right_val)
            }

            Expression::Logical { op, left, right } => self.eval_logical(*op, left, right),

            Expression::Unary { op, operand } => {
                let val = self.evaluate_expression(operand)?;
                self.apply_unary(*op, val)
            }

            Expression::Call { callee, args } => self.eval_call(callee, args),

            Expression::Grouping(inner) => self.evaluate_expression(inner),
        }
    }

    fn eval_logical(&mut self, op: LogicalOp, left: &Expression, right: &Expression) -> Result<Value> {
        let left_val = self.evaluate_expression(left)?.as_bool()?;

        // short circuit before the right operand evaluates
        let result = match op {
            LogicalOp::And => {
                if !left_val {
                    false
                } else {
                    self.evaluate_expression(right)?.as_bool()?
                }
            }
            LogicalOp::Or => {
                if left_val {
                    true
                } else {
                    self.evaluate_expression(right)?.as_bool()?
                }
            }
        };

        Ok(Value::Bool(result))
    }

    fn apply_binary(&self, op: BinaryOp, left: Value, right: Value) -> Result<Value> {
        match op {
            BinaryOp::Add => match (&left, &right) {
                (Value::Int(l), Value::Int(r)) => l
                    .checked_add(*r)
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in addition")),
                (Value::String(l), Value::String(r)) => {
                    Ok(Value::String(format!("{}{}", l, r)))
                }
                _ => Err(Self::invalid_operation(op, &left, &right)),
            },
            BinaryOp::Sub => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                l.checked_sub(r)
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in subtraction"))
            }
            BinaryOp::Mul => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                l.checked_mul(r)
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in multiplication"))
            }
            BinaryOp::Div => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                if r == 0 {
                    return Err(Error::DivisionByZero);
                }
                l.checked_div(r)
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in division"))
            }
            BinaryOp::Mod => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                if r == 0 {
                    return Err(Error::DivisionByZero);
                }
                l.checked_rem(r)
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in remainder"))
            }
            BinaryOp::Eq => Ok(Value::Bool(left == right)),
            BinaryOp::NotEq => Ok(Value::Bool(left != right)),
            BinaryOp::Lt => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                Ok(Value::Bool(l < r))
            }
            BinaryOp::Gt => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                Ok(Value::Bool(l > r))
            }
            BinaryOp::LtEq => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                Ok(Value::Bool(l <= r))
            }
            BinaryOp::GtEq => {
                let (l, r) = Self::int_operands(op, &left, &right)?;
                Ok(Value::Bool(l >= r))
            }
        }
    }

    fn int_operands(op: BinaryOp, left: &Value, right: &Value) -> Result<(i64, i64)> {
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => Ok((*l, *r)),
            _ => Err(Self::invalid_operation(op, left, right)),
        }
    }

    fn invalid_operation(op: BinaryOp, left: &Value, right: &Value) -> Error {
        Error::InvalidOperation {
            op: op.to_string(),
            left_type: left.type_name().to_string(),
            right_type: right.type_name().to_string(),
        }
    }

    fn apply_unary(&self, op: UnaryOp, value: Value) -> Result<Value> {
        match op {
            UnaryOp::Neg => {
                let n = value.as_int()?;
                n.checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in negation"))
            }
            UnaryOp::Not => Ok(Value::Bool(!value.as_bool()?)),
        }
    }

    fn eval_call(&mut self, callee: &Expression, args: &[Expression]) -> Result<Value> {
        let callee_val = self.evaluate_expression(callee)?;

        let mut arg_vals = Vec::with_capacity(args.len());
        for arg in args {
            arg_vals.push(self.evaluate_expression(arg)?);
        }

        match callee_val {
            Value::Builtin(builtin) => self.call_builtin(builtin, arg_vals),
            other => Err(Error::NotCallable {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    fn call_builtin(&mut self, builtin: Builtin, args: Vec<Value>) -> Result<Value> {
        match builtin {
            Builtin::Print => {
                if args.len() != 1 {
                    return Err(Error::InvalidArguments {
                        name: builtin.name().to_string(),
                        reason: format!("expected 1 argument, got {}", args.len()),
                    });
                }
                // one logical write per print, in program order
                self.sink.write(&args[0].to_string());
                Ok(Value::Unit)
            }
        }
    }
}
