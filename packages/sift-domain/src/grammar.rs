//! Minimal structured query grammar.
//!
//! Terms are separated by whitespace, `"double quotes"` group a phrase, and a leading `-`
//! excludes a term or phrase. Every positive clause must match.

use crate::query::{QueryTree, TEXT_FIELD};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
	#[error("Unterminated quoted phrase at byte {offset}.")]
	UnterminatedPhrase { offset: usize },
	#[error("Query has no positive clause.")]
	NoPositiveClause,
}

enum Clause<'a> {
	Term(&'a str),
	Phrase(&'a str),
}

pub fn parse(text: &str) -> Result<QueryTree, GrammarError> {
	let mut must = Vec::new();
	let mut must_not = Vec::new();
	let mut rest = text;

	loop {
		rest = rest.trim_start();

		if rest.is_empty() {
			break;
		}

		let negated = rest
			.strip_prefix('-')
			.is_some_and(|tail| tail.starts_with(|c: char| !c.is_whitespace()));

		if negated {
			rest = &rest[1..];
		}

		let (clause, remaining) = next_clause(rest, text.len() - rest.len())?;

		rest = remaining;

		let Some(tree) = clause_tree(clause) else {
			continue;
		};

		if negated {
			must_not.push(tree);
		} else {
			must.push(tree);
		}
	}

	if must.is_empty() {
		return Err(GrammarError::NoPositiveClause);
	}
	if must.len() == 1 && must_not.is_empty() {
		return Ok(must.remove(0));
	}

	Ok(QueryTree::Bool { must, must_not, should: Vec::new() })
}

fn next_clause(input: &str, offset: usize) -> Result<(Clause<'_>, &str), GrammarError> {
	if let Some(body) = input.strip_prefix('"') {
		let end = body.find('"').ok_or(GrammarError::UnterminatedPhrase { offset })?;

		return Ok((Clause::Phrase(&body[..end]), &body[end + 1..]));
	}

	let end = input.find(char::is_whitespace).unwrap_or(input.len());

	Ok((Clause::Term(&input[..end]), &input[end..]))
}

fn clause_tree(clause: Clause<'_>) -> Option<QueryTree> {
	match clause {
		Clause::Term(term) =>
			Some(QueryTree::Match { field: TEXT_FIELD.to_string(), text: term.to_string() }),
		Clause::Phrase(phrase) => {
			let phrase = phrase.trim();

			if phrase.is_empty() {
				return None;
			}

			Some(QueryTree::Phrase { field: TEXT_FIELD.to_string(), text: phrase.to_string() })
		},
	}
}
