//! AWS Lambda function for lab directory search.
//!
//! Serves `GET /labs-search` behind API Gateway using the bundled dataset.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    labfinder_lambda_labs_search::run().await
}
