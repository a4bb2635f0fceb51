use nom::{
    bytes::complete::take_till, character::complete::char as nom_char, combinator::all_consuming,
    multi::separated_list1,
};

use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};
use crate::model::Label;

/// Parses `name:value,name:value`. The empty string means no labels.
///
/// The value runs up to the next comma and may itself contain colons.
/// Whitespace around names and values is dropped.
pub fn parse_label_pairs(s: &str) -> Result<Vec<Label>> {
    if s.trim().is_empty() {
        return Ok(vec![]);
    }

    match all_consuming(label_pairs)(Span::new(s)) {
        Ok((_, labels)) => Ok(labels),
        Err(err) => {
            let err = ParseError::from(err);
            Err(Error::input(&format!(
                "invalid labels '{}': {} at offset {}",
                s,
                err.message(),
                err.offset()
            )))
        }
    }
}

fn label_pairs(input: Span) -> IResult<Vec<Label>> {
    separated_list1(nom_char(','), label_pair)(input)
}

fn label_pair(input: Span) -> IResult<Label> {
    let (rest, name) = label_name(input)?;

    let (rest, _) = match nom_char::<Span, ParseError>(':')(rest) {
        Ok(r) => r,
        Err(_) => {
            return Err(nom::Err::Failure(ParseError::new(
                format!("expected ':' after label name '{}'", name),
                rest,
            )))
        }
    };

    let (rest, value) = take_till::<_, Span, ParseError>(|c| c == ',')(rest)?;
    Ok((rest, Label::new(name, value.fragment().trim())))
}

fn label_name(input: Span) -> IResult<String> {
    let (rest, m) = take_till::<_, Span, ParseError>(|c| c == ':' || c == ',')(input)?;

    let name = m.fragment().trim();
    if name.is_empty() {
        return Err(nom::Err::Failure(ParseError::new(
            "label name expected".to_owned(),
            input,
        )));
    }

    Ok((rest, name.to_owned()))
}
