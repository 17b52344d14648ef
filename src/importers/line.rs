//! Tokenised view of one line of a text asset file.

use std::path::Path;

use super::error::ImportError;

/// One non-blank, non-comment line: the directive keyword plus its operands.
pub(crate) struct SourceLine<'a> {
    pub path: &'a Path,
    /// 1-based.
    pub number: usize,
    pub directive: &'a str,
    pub operands: Vec<&'a str>,
    /// Everything after the directive, trimmed. Used for names that may contain spaces.
    pub rest: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Returns `None` for blank lines and comments.
    pub fn parse(path: &'a Path, number: usize, text: &'a str) -> Option<Self> {
        let trimmed = text.trim();
        let mut tokens = trimmed.split_whitespace();
        let directive = tokens.next()?;
        if directive.starts_with('#') {
            return None;
        }

        Some(Self {
            path,
            number,
            directive,
            operands: tokens.collect(),
            rest: trimmed[directive.len()..].trim(),
        })
    }

    pub fn operand(&self, index: usize) -> Result<&'a str, ImportError> {
        self.operands
            .get(index)
            .copied()
            .ok_or_else(|| self.missing_operand())
    }

    pub fn float(&self, index: usize) -> Result<f32, ImportError> {
        let token = self.operand(index)?;
        token.parse().map_err(|_| self.parse_error(token))
    }

    /// Parses the first `N` operands as floats; extra operands are ignored.
    pub fn floats<const N: usize>(&self) -> Result<[f32; N], ImportError> {
        let mut values = [0.0; N];
        for (index, value) in values.iter_mut().enumerate() {
            *value = self.float(index)?;
        }
        Ok(values)
    }

    /// The rest of the line, failing if it is empty.
    pub fn name(&self) -> Result<&'a str, ImportError> {
        if self.rest.is_empty() {
            Err(self.missing_operand())
        } else {
            Ok(self.rest)
        }
    }

    pub fn parse_error(&self, token: &str) -> ImportError {
        ImportError::Parse {
            path: self.path.to_path_buf(),
            line: self.number,
            token: token.to_string(),
        }
    }

    pub fn missing_operand(&self) -> ImportError {
        ImportError::MissingOperand {
            path: self.path.to_path_buf(),
            line: self.number,
            directive: self.directive.to_string(),
        }
    }
}
