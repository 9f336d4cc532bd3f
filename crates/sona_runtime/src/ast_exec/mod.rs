mod access;
mod call;
mod expr;
mod stmt;
