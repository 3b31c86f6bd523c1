use crate::ai::TextGenerator;
use crate::error::{InfraError, Result};
use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;
use std::time::Duration;

/// A `TextGenerator` that returns a canned reply and records every prompt.
pub(crate) struct MockGenerator {
    reply: std::result::Result<String, String>,
    prompts: RefCell<Vec<String>>,
}

impl MockGenerator {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Every call fails with `NetworkFailure(message)`.
    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(InfraError::NetworkFailure(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// A local HTTP server that answers exactly one request.
pub(crate) struct OneShotServer {
    port: u16,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub(crate) fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let body = body.to_string();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();
            let request = read_request(&mut stream);

            let response = format!(
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        Self { port, handle }
    }

    /// Base URL of a port nothing is listening on.
    pub(crate) fn unused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Wait for the server thread and return the raw request it received.
    pub(crate) fn finish(self) -> String {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&data).into_owned();
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    String::from_utf8_lossy(&data).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// A well-formed multi-file Kubernetes response, as the model is asked to produce it.
pub(crate) const K8S_RESPONSE: &str = r#"Here are your manifests.

---
# FILE: deployment.yaml
```yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: flask-app
  labels:
    app: flask-app
spec:
  replicas: 3
  selector:
    matchLabels:
      app: flask-app
  template:
    metadata:
      labels:
        app: flask-app
    spec:
      securityContext:
        runAsNonRoot: true
      containers:
        - name: flask-app
          image: flask-app:1.0.0
          ports:
            - containerPort: 8080
          resources:
            requests:
              cpu: 100m
              memory: 128Mi
            limits:
              cpu: 250m
              memory: 512Mi
          livenessProbe:
            httpGet:
              path: /healthz
              port: 8080
          readinessProbe:
            httpGet:
              path: /ready
              port: 8080
```
---
# FILE: service.yaml
apiVersion: v1
kind: Service
metadata:
  name: flask-app
spec:
  type: LoadBalancer
  selector:
    app: flask-app
  ports:
    - port: 80
      targetPort: 8080
---
# FILE: configmap.yaml
apiVersion: v1
kind: ConfigMap
metadata:
  name: flask-app-config
data:
  LOG_LEVEL: info
"#;

pub(crate) const TERRAFORM_RESPONSE: &str = r#"---
# FILE: main.tf
```hcl
terraform {
  required_version = ">= 1.5"
}

provider "aws" {
  region = var.region
}

resource "aws_vpc" "main" {
  cidr_block = "10.0.0.0/16"
  tags = {
    Name = "main"
  }
}
```
---
# FILE: variables.tf
variable "region" {
  type    = string
  default = "us-east-1"
}
---
# FILE: outputs.tf
output "vpc_id" {
  value = aws_vpc.main.id
}
"#;

pub(crate) const DOCKER_RESPONSE: &str = r#"```dockerfile
# Build stage
FROM python:3.11-slim AS builder
WORKDIR /app
COPY requirements.txt .
RUN pip install --no-cache-dir --prefix=/install -r requirements.txt

# Runtime stage
FROM python:3.11-slim
WORKDIR /app
COPY --from=builder /install /usr/local
COPY . .
RUN useradd --create-home appuser
USER appuser
EXPOSE 8080
HEALTHCHECK CMD python -c "import urllib.request; urllib.request.urlopen('http://localhost:8080/health')"
CMD ["python", "app.py"]
```"#;

pub(crate) const GITHUB_RESPONSE: &str = r#"```yaml
name: Deploy

on:
  push:
    branches: [main]

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: make test
```"#;
