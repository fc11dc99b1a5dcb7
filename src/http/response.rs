use actix_web::{HttpRequest, HttpResponse, Responder, body::BoxBody};

/// A reply already encoded in the outbound format.
#[derive(Debug)]
pub struct Encoded {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

impl Encoded {
    pub fn new(body: Vec<u8>, content_type: &'static str) -> Self {
        Self { body, content_type }
    }
}

impl Responder for Encoded {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok()
            .content_type(self.content_type)
            .body(self.body)
    }
}
