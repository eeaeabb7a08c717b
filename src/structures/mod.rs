/*!
The abstract elements of a problem: [atoms](atom), [literals](literal), [generalized
clauses](clause), [rules](rule), [theory propositions](theory), and [solutions](solution).

As in the teacher's layering, these are plain data types with no solving behavior of their
own; the databases in [db](crate::db) own the indexes and incremental bookkeeping built on
top of them.
*/

pub mod atom;
pub mod clause;
pub mod literal;
pub mod objective;
pub mod rule;
pub mod solution;
pub mod theory;
