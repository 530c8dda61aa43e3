//! Integration tests for dynvalue, consolidated into one test binary.

mod depth;
mod query;
mod records;
mod roundtrip;
mod scenarios;
