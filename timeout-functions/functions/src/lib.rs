//! Deployable handlers for the timeout greeting functions.
//!
//! - `aws-timeout`: the AWS Lambda function, run under `lambda_runtime`
//! - `ibm-timeout`: the OpenWhisk / IBM Cloud Functions native action
//!
//! The [`action`] module holds the native action plumbing so it can be
//! tested without spawning the binary.

pub mod action;
