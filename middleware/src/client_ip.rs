use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response, header::FORWARDED},
    middleware::Next,
};
use forwarded_header_value::{ForwardedHeaderValue, Identifier};

/// Request extension inserted by [`mw_client_ip`].
/// `None` when neither a `Forwarded` header nor connect info is available,
/// which is always the case for in-process `oneshot` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

pub async fn mw_client_ip(mut request: Request<Body>, next: Next) -> Response<Body> {
    let ip = ClientIp(resolve(&request));
    request.extensions_mut().insert(ip);
    next.run(request).await
}

fn resolve<B>(request: &Request<B>) -> Option<IpAddr> {
    from_forwarded(request).or_else(|| {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    })
}

fn from_forwarded<B>(request: &Request<B>) -> Option<IpAddr> {
    let header = request.headers().get(FORWARDED)?.to_str().ok()?;
    let stanza = ForwardedHeaderValue::from_str(header).ok()?.into_remotest();
    match stanza.forwarded_for? {
        Identifier::SocketAddr(addr) => Some(addr.ip()),
        Identifier::IpAddr(ip) => Some(ip),
        _ => None,
    }
}
