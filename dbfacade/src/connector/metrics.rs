use crate::ast::{Params, Value};
use std::{future::Future, time::Instant};
use tracing::debug;

pub(crate) async fn query<'a, F, T, U>(tag: &'static str, query: &'a str, params: &'a [Value<'_>], f: F) -> crate::Result<T>
where
    F: FnOnce() -> U,
    U: Future<Output = crate::Result<T>>,
{
    let start = Instant::now();
    let res = f().await;
    let elapsed = start.elapsed();

    debug!(
        name = tag,
        query = %query,
        params = %Params(params),
        duration_ms = elapsed.as_millis() as u64,
        success = res.is_ok(),
        "query finished"
    );

    res
}

pub(crate) async fn connect<F, T, U>(tag: &'static str, f: F) -> crate::Result<T>
where
    F: FnOnce() -> U,
    U: Future<Output = crate::Result<T>>,
{
    let start = Instant::now();
    let res = f().await;
    let elapsed = start.elapsed();

    debug!(
        name = tag,
        duration_ms = elapsed.as_millis() as u64,
        success = res.is_ok(),
        "connect finished"
    );

    res
}
