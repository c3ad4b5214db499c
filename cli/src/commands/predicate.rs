use crate::error::{self, Result};
use crate::value::ValuePair;
use chronobox_datatypes::codec::IsoTimestampFormat;
use chronobox_datatypes::operations::{BoxPosition, BoxTopology};
use chronobox_datatypes::primitives::Period;
use chronobox_datatypes::util::Result as DatatypesResult;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Predicate {
    Contains,
    Contained,
    Overlaps,
    Same,
    Adjacent,
    Left,
    Overleft,
    Right,
    Overright,
    Below,
    Overbelow,
    Above,
    Overabove,
    Front,
    Overfront,
    Back,
    Overback,
    Before,
    Overbefore,
    After,
    Overafter,
}

/// Evaluates a topological or positional predicate on two values and prints `true` or `false`
#[derive(Debug, Parser)]
pub struct PredicateArgs {
    #[arg(value_enum)]
    predicate: Predicate,
    left: String,
    right: String,
}

pub fn predicate(params: PredicateArgs, format: &IsoTimestampFormat) -> Result<String> {
    let pair = ValuePair::parse(&params.left, &params.right, format)?;
    let kind = pair.kind();

    let result = match pair {
        ValuePair::Period(left, right) => evaluate_period(params.predicate, &left, &right),
        ValuePair::TBox(left, right) => evaluate_box(params.predicate, &left, &right),
        ValuePair::STBox(left, right) => match params.predicate {
            Predicate::Below => Some(left.below(&right)),
            Predicate::Overbelow => Some(left.overbelow(&right)),
            Predicate::Above => Some(left.above(&right)),
            Predicate::Overabove => Some(left.overabove(&right)),
            Predicate::Front => Some(left.front(&right)),
            Predicate::Overfront => Some(left.overfront(&right)),
            Predicate::Back => Some(left.back(&right)),
            Predicate::Overback => Some(left.overback(&right)),
            other => evaluate_box(other, &left, &right),
        },
    };

    let Some(result) = result else {
        return error::UnsupportedPredicate {
            predicate: params.predicate,
            kind,
        }
        .fail();
    };

    Ok(result?.to_string())
}

/// Predicates shared by both box types, `None` for the ones they lack.
fn evaluate_box<B>(predicate: Predicate, left: &B, right: &B) -> Option<DatatypesResult<bool>>
where
    B: BoxTopology + BoxPosition,
{
    let result = match predicate {
        Predicate::Contains => left.contains(right),
        Predicate::Contained => left.contained(right),
        Predicate::Overlaps => left.overlaps(right),
        Predicate::Same => left.same(right),
        Predicate::Adjacent => left.adjacent(right),
        Predicate::Left => left.left(right),
        Predicate::Overleft => left.overleft(right),
        Predicate::Right => left.right(right),
        Predicate::Overright => left.overright(right),
        Predicate::Before => left.before(right),
        Predicate::Overbefore => left.overbefore(right),
        Predicate::After => left.after(right),
        Predicate::Overafter => left.overafter(right),
        _ => return None,
    };
    Some(result)
}

fn evaluate_period(
    predicate: Predicate,
    left: &Period,
    right: &Period,
) -> Option<DatatypesResult<bool>> {
    let result = match predicate {
        Predicate::Contains => left.contains(right),
        Predicate::Contained => left.contained(right),
        Predicate::Overlaps => left.overlaps(right),
        Predicate::Same => left == right,
        Predicate::Adjacent => left.adjacent(right),
        Predicate::Before => left.before(right),
        Predicate::Overbefore => left.overbefore(right),
        Predicate::After => left.after(right),
        Predicate::Overafter => left.overafter(right),
        _ => return None,
    };
    Some(Ok(result))
}
