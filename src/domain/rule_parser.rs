//! Policy rule DSL parser.
//!
//! Recursive descent parser for operator-authored rule lists. Converts text
//! to an ordered `Vec<Rule>` with error messages carrying the character
//! offset and the expected/found tokens.
//!
//! ```text
//! rules := ε | rule (';' rule)* ';'?
//! rule  := MAX_SIZE(n) | PER_MARKET_CAP(n) | MIN_LIQUIDITY(n) | MAX_PRICE(n)
//!        | WHITELIST_MARKETS(value, ...) | ALLOW_CATEGORIES(value, ...)
//! value := "quoted text" | bare-token
//! ```
//!
//! Value lists may be empty. Inside quotes `\"` and `\\` escape a quote
//! and a backslash.

use crate::domain::error::ParseError;
use crate::domain::rule::Rule;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            position: self.pos,
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn peek_word(&self) -> String {
        let word: String = self
            .remaining()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if word.is_empty() {
            self.peek()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "end of input".to_string())
        } else {
            word
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut has_dot = false;
        let mut digits = 0;

        if self.peek() == Some('-') {
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else if ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            self.pos = start;
            return Err(self.error(format!("expected number, found '{}'", self.peek_word())));
        }

        let num_str: String = self.input[start..self.pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        num_str.parse::<f64>().map_err(|_| ParseError {
            message: format!("invalid number: {num_str}"),
            position: start,
        })
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.advance();
        let mut value = String::new();
        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(value),
                '\\' => match self.advance() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(ParseError {
            message: "unterminated string".to_string(),
            position: start,
        })
    }

    fn parse_value(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            return self.parse_quoted();
        }

        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | ':' | '/' | '-') {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(self.error(format!("expected value, found '{}'", self.peek_word())));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_value_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(Vec::new());
        }

        let mut values = vec![self.parse_value()?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some(')') {
                self.advance();
                return Ok(values);
            }
            self.expect_char(',')?;
            values.push(self.parse_value()?);
        }
    }

    fn parse_threshold(&mut self) -> Result<f64, ParseError> {
        let value = self.parse_number()?;
        self.expect_char(')')?;
        Ok(value)
    }

    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        self.skip_whitespace();
        let keyword_pos = self.pos;
        let keyword = self.peek_word();
        if !keyword.chars().all(|c| c.is_alphanumeric() || c == '_') || keyword.is_empty() {
            return Err(self.error(format!("expected rule, found '{keyword}'")));
        }

        let known = matches!(
            keyword.as_str(),
            "MAX_SIZE"
                | "PER_MARKET_CAP"
                | "MIN_LIQUIDITY"
                | "MAX_PRICE"
                | "WHITELIST_MARKETS"
                | "ALLOW_CATEGORIES"
        );
        if !known {
            return Err(self.error(format!("expected rule, found '{keyword}'")));
        }

        self.pos += keyword.len();
        self.expect_char('(')?;

        let rule = match keyword.as_str() {
            "MAX_SIZE" => Rule::MaxSize {
                max: self.parse_threshold()?,
            },
            "PER_MARKET_CAP" => Rule::PerMarketCap {
                max: self.parse_threshold()?,
            },
            "MIN_LIQUIDITY" => Rule::MinLiquidity {
                min: self.parse_threshold()?,
            },
            "MAX_PRICE" => Rule::MaxPrice {
                max: self.parse_threshold()?,
            },
            "WHITELIST_MARKETS" => Rule::WhitelistMarkets {
                allowed_ids: self.parse_value_list()?,
            },
            "ALLOW_CATEGORIES" => Rule::AllowCategories {
                categories: self.parse_value_list()?,
            },
            _ => {
                return Err(ParseError {
                    message: format!("expected rule, found '{keyword}'"),
                    position: keyword_pos,
                });
            }
        };

        Ok(rule)
    }

    fn parse_rules(&mut self) -> Result<Vec<Rule>, ParseError> {
        let mut rules = Vec::new();
        if self.at_end() {
            return Ok(rules);
        }

        rules.push(self.parse_rule()?);
        loop {
            if self.at_end() {
                return Ok(rules);
            }
            self.expect_char(';')?;
            if self.at_end() {
                return Ok(rules);
            }
            rules.push(self.parse_rule()?);
        }
    }
}

/// Parse a `;`-separated rule list. Empty input yields an empty list.
pub fn parse(input: &str) -> Result<Vec<Rule>, ParseError> {
    let mut parser = Parser::new(input);
    parser.parse_rules()
}

/// Parse exactly one rule.
pub fn parse_rule(input: &str) -> Result<Rule, ParseError> {
    let mut parser = Parser::new(input);
    let rule = parser.parse_rule()?;
    if !parser.at_end() {
        return Err(ParseError {
            message: format!("unexpected input after rule: '{}'", parser.remaining()),
            position: parser.pos,
        });
    }
    Ok(rule)
}
