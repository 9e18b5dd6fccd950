#![allow(dead_code)]
/*!
A library for deciding the satisfiability of knowledge bases written in a
description logic with local and global definite descriptions.

The logic extends ALC with two description connectives: `i.C` asserts that
the current individual is the unique one satisfying `C`, and `i C.D` asserts
that a unique individual satisfies `C` and that it also satisfies `D`.
Satisfiability is decided by a semantic tableau: an [interpretation] is grown
by a fixed-priority set of expansion rules until it is saturated (the input
is satisfiable), every branch has closed on a clash (unsatisfiable), or a
wall-clock limit is hit (unknown).

A solve is driven through a [Context](crate::context::Context), built from a
target concept together with ABox, RBox and TBox inputs.

[interpretation]: crate::structures::interpretation::Interpretation
*/

pub mod config;
pub mod context;
pub mod io;
pub mod rules;
pub mod structures;
pub mod types;

mod log;
