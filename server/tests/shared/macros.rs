#[macro_export]
macro_rules! request {
    ( $method:ident $url:expr ) => {{
        axum::http::Request::builder()
            .method(stringify!($method))
            .uri($url)
            .body(axum::body::Body::empty())
            .expect("unable to build request")
    }};

    ( $method:ident $url:expr ; $($header:expr => $value:expr)* ) => {{
        let mut req = axum::http::Request::builder()
            .method(stringify!($method))
            .uri($url);

        $(
            req = req.header($header, $value);
        )*

        req.body(axum::body::Body::empty()).expect("unable to build request")
    }};
}
