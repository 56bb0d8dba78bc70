//! 计算工具
//!
//! 模型给出的表达式先过字符白名单（数字、`+-*/().` 与空格），再交给递归下降求值器：
//! 只认数字字面量、一元正负号、四则运算与括号，从不经过通用代码求值。

use crate::core::ToolError;
use crate::tools::Tool;

/// 表达式最大长度（字符）
const MAX_EXPR_CHARS: usize = 256;
/// 括号与一元运算符的最大嵌套深度
const MAX_DEPTH: usize = 64;

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | ' ')
}

/// 计算表达式的值
pub fn evaluate(expr: &str) -> Result<f64, ToolError> {
    if !expr.chars().all(is_allowed) {
        return Err(ToolError::IllegalCharacters);
    }
    if expr.chars().count() > MAX_EXPR_CHARS {
        return Err(ToolError::Evaluation(format!("表达式超过 {MAX_EXPR_CHARS} 个字符")));
    }
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(ToolError::Evaluation("表达式为空".to_string()));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(ToolError::Evaluation(format!(
            "第 {} 个记号处有多余内容",
            parser.pos + 1
        )));
    }
    if !value.is_finite() {
        return Err(ToolError::Evaluation("结果溢出".to_string()));
    }
    Ok(value)
}

/// 整数结果不带小数部分（2+2 -> "4"）
pub fn format_number(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ToolError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let tok = match c {
            ' ' => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let n = literal
                    .parse::<f64>()
                    .map_err(|_| ToolError::Evaluation(format!("无法识别的数字 '{literal}'")))?;
                tokens.push(Token::Num(n));
                continue;
            }
        };
        tokens.push(tok);
        i += 1;
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn descend(&mut self) -> Result<(), ToolError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ToolError::Evaluation("嵌套过深".to_string()));
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, ToolError> {
        let mut acc = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == Token::Plus { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ToolError> {
        let mut acc = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = if op == Token::Star {
                acc * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ToolError::DivisionByZero);
                }
                acc / rhs
            };
        }
        Ok(acc)
    }

    // unary := ('+' | '-') unary | primary
    fn unary(&mut self) -> Result<f64, ToolError> {
        match self.peek() {
            Some(Token::Minus) | Some(Token::Plus) => {
                let negate = self.peek() == Some(Token::Minus);
                self.pos += 1;
                self.descend()?;
                let v = self.unary()?;
                self.depth -= 1;
                Ok(if negate { -v } else { v })
            }
            _ => self.primary(),
        }
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64, ToolError> {
        match self.peek() {
            Some(Token::Num(n)) => {
                self.pos += 1;
                Ok(n)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                self.descend()?;
                let v = self.expr()?;
                self.depth -= 1;
                if self.peek() != Some(Token::RParen) {
                    return Err(ToolError::Evaluation("括号不匹配".to_string()));
                }
                self.pos += 1;
                Ok(v)
            }
            Some(t) => Err(ToolError::Evaluation(format!(
                "第 {} 个记号 {t:?} 不应出现在此处",
                self.pos + 1
            ))),
            None => Err(ToolError::Evaluation("表达式不完整".to_string())),
        }
    }
}

/// calculate 工具
pub struct CalculatorTool;

impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "数学计算，只支持数字与 + - * / ( )，参数必须是可直接计算的表达式，如 10000/450"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("expression", "数学表达式"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        tracing::info!(expression = input, "进行计算");
        evaluate(input.trim()).map(format_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(CalculatorTool.execute("2+2").unwrap(), "4");
        assert_eq!(CalculatorTool.execute("(1000*12)*0.05").unwrap(), "600");
        assert_eq!(CalculatorTool.execute("2 + 3 * 4").unwrap(), "14");
        assert_eq!(CalculatorTool.execute("(2 + 3) * 4").unwrap(), "20");
        assert_eq!(CalculatorTool.execute("7/2").unwrap(), "3.5");
        assert_eq!(CalculatorTool.execute("-3 - -2").unwrap(), "-1");
        assert_eq!(CalculatorTool.execute(".5*4").unwrap(), "2");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(CalculatorTool.execute("10-4-3").unwrap(), "3");
        assert_eq!(CalculatorTool.execute("100/10/2").unwrap(), "5");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(CalculatorTool.execute("10/0"), Err(ToolError::DivisionByZero));
        assert_eq!(CalculatorTool.execute("1/(2-2)"), Err(ToolError::DivisionByZero));
    }

    #[test]
    fn test_illegal_characters() {
        for input in ["2**x", "import os", "1e3", "2^3", "abs(-1)", "1,000"] {
            assert_eq!(
                CalculatorTool.execute(input),
                Err(ToolError::IllegalCharacters),
                "{input}"
            );
        }
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["", "   ", "(1+2", "1+2)", "1..2", "2**3", "*3", "()"] {
            assert!(
                matches!(CalculatorTool.execute(input), Err(ToolError::Evaluation(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(deep.len() <= MAX_EXPR_CHARS);
        assert!(matches!(evaluate(&deep), Err(ToolError::Evaluation(_))));
        let minus = format!("{}1", "-".repeat(200));
        assert!(matches!(evaluate(&minus), Err(ToolError::Evaluation(_))));
    }

    #[test]
    fn test_length_limit() {
        let long = "1+".repeat(200) + "1";
        assert!(matches!(evaluate(&long), Err(ToolError::Evaluation(_))));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(22.5), "22.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
