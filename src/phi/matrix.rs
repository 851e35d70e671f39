use ndarray::{Array2, ArrayView2, ArrayViewMut2, Zip};

use super::Token;
use crate::error::{CoreErr, Result};

/// A dense `token_size × topic_size` weight matrix with named rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PhiMatrix {
    tokens: Vec<Token>,
    topic_names: Vec<String>,
    values: Array2<f32>,
}

impl PhiMatrix {
    /// Creates a zero-filled matrix.
    ///
    /// # Arguments
    /// * `tokens` - The row identities, in matrix order.
    /// * `topic_names` - The column names, in matrix order.
    pub fn new(tokens: Vec<Token>, topic_names: Vec<String>) -> Self {
        let values = Array2::zeros((tokens.len(), topic_names.len()));

        Self {
            tokens,
            topic_names,
            values,
        }
    }

    /// Creates a matrix from already computed values.
    ///
    /// # Returns
    /// A `ShapeMismatch` error if `values` isn't `tokens.len() × topic_names.len()`.
    pub fn from_values(
        tokens: Vec<Token>,
        topic_names: Vec<String>,
        values: Array2<f32>,
    ) -> Result<Self> {
        let (rows, cols) = values.dim();

        if rows != tokens.len() {
            return Err(CoreErr::ShapeMismatch {
                what: "token count",
                got: rows,
                expected: tokens.len(),
            });
        }

        if cols != topic_names.len() {
            return Err(CoreErr::ShapeMismatch {
                what: "topic count",
                got: cols,
                expected: topic_names.len(),
            });
        }

        Ok(Self {
            tokens,
            topic_names,
            values,
        })
    }

    /// A zero-filled matrix with the same tokens and topics as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::new(self.tokens.clone(), self.topic_names.clone())
    }

    #[inline]
    pub fn token_size(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn topic_size(&self) -> usize {
        self.topic_names.len()
    }

    #[inline]
    pub fn token(&self, token_id: usize) -> &Token {
        &self.tokens[token_id]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn topic_names(&self) -> &[String] {
        &self.topic_names
    }

    /// Returns the value at `(token_id, topic_id)` (panics if out of bounds).
    #[inline]
    pub fn get(&self, token_id: usize, topic_id: usize) -> f32 {
        self.values[[token_id, topic_id]]
    }

    #[inline]
    pub fn set(&mut self, token_id: usize, topic_id: usize, value: f32) {
        self.values[[token_id, topic_id]] = value;
    }

    pub fn values(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    pub fn values_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.values.view_mut()
    }

    /// Checks that `other` is indexed exactly like `self`.
    ///
    /// # Returns
    /// A `ShapeMismatch` naming the first dimension that disagrees, or a
    /// `TokenMismatch`/`TopicMismatch` at the first row or column labelled differently.
    pub fn check_same_layout(&self, other: &PhiMatrix) -> Result<()> {
        if self.token_size() != other.token_size() {
            return Err(CoreErr::ShapeMismatch {
                what: "token count",
                got: other.token_size(),
                expected: self.token_size(),
            });
        }

        if self.topic_size() != other.topic_size() {
            return Err(CoreErr::ShapeMismatch {
                what: "topic count",
                got: other.topic_size(),
                expected: self.topic_size(),
            });
        }

        let mismatch = self
            .tokens
            .iter()
            .zip(&other.tokens)
            .enumerate()
            .find(|(_, (expected, got))| expected != got);

        if let Some((position, (expected, got))) = mismatch {
            return Err(CoreErr::TokenMismatch {
                position,
                got: got.clone(),
                expected: expected.clone(),
            });
        }

        let mismatch = self
            .topic_names
            .iter()
            .zip(&other.topic_names)
            .enumerate()
            .find(|(_, (expected, got))| expected != got);

        if let Some((position, (expected, got))) = mismatch {
            return Err(CoreErr::TopicMismatch {
                position,
                got: got.clone(),
                expected: expected.clone(),
            });
        }

        Ok(())
    }

    /// Adds `tau * other` into `self` element-wise.
    ///
    /// # Returns
    /// A `ShapeMismatch` if the matrices aren't indexed alike.
    pub fn add_scaled(&mut self, tau: f32, other: &PhiMatrix) -> Result<()> {
        self.check_same_layout(other)?;

        Zip::from(&mut self.values)
            .and(&other.values)
            .for_each(|acc, &v| *acc += tau * v);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn topics(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("topic_{i}")).collect()
    }

    #[test]
    fn new_is_zero_filled() {
        let m = PhiMatrix::new(vec![Token::keyword("a"), Token::keyword("b")], topics(3));

        assert_eq!(m.token_size(), 2);
        assert_eq!(m.topic_size(), 3);
        assert!(m.values().iter().all(|&v| v == 0.));
    }

    #[test]
    fn from_values_checks_dimensions() {
        let err = PhiMatrix::from_values(vec![Token::keyword("a")], topics(2), array![[1., 2., 3.]])
            .unwrap_err();

        assert!(matches!(err, CoreErr::ShapeMismatch { what: "topic count", got: 3, expected: 2 }));
    }

    #[test]
    fn layout_check_detects_reordered_topics() {
        let a = PhiMatrix::new(vec![Token::keyword("a")], vec!["x".into(), "y".into()]);
        let b = PhiMatrix::new(vec![Token::keyword("a")], vec!["y".into(), "x".into()]);

        assert!(a.check_same_layout(&a.zeros_like()).is_ok());
        assert!(matches!(
            a.check_same_layout(&b),
            Err(CoreErr::TopicMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn layout_check_detects_reordered_tokens() {
        let a = PhiMatrix::new(vec![Token::keyword("a"), Token::keyword("b")], topics(1));
        let b = PhiMatrix::new(vec![Token::keyword("b"), Token::keyword("a")], topics(1));

        let err = a.check_same_layout(&b).unwrap_err();
        assert!(matches!(
            err,
            CoreErr::TokenMismatch { position: 0, ref got, ref expected }
                if *got == Token::keyword("b") && *expected == Token::keyword("a")
        ));
    }

    #[test]
    fn add_scaled_accumulates() {
        let tokens = vec![Token::keyword("a")];
        let mut acc = PhiMatrix::from_values(tokens.clone(), topics(2), array![[1., 1.]]).unwrap();
        let other = PhiMatrix::from_values(tokens, topics(2), array![[2., -4.]]).unwrap();

        acc.add_scaled(0.5, &other).unwrap();
        assert_eq!(acc.values(), array![[2f32, -1.]]);
    }
}
