use std::{
    io,
    net::{SocketAddr, ToSocketAddrs},
    time::Duration,
};

use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::{TcpListener, TcpStream};

use crate::{
    config::{ServerConfig, LISTEN_BACKLOG},
    error::{BindError, ServeError},
    response,
};

const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// A bound, listening responder that has not started accepting yet.
#[derive(Debug)]
pub struct Server {
    listener: std::net::TcpListener,
    hostname: String,
    local_addr: SocketAddr,
}

impl Server {
    /// Binds only the first address `config.hostname` resolves to. Later
    /// addresses are never tried, so a taken port fails with `AddrInUse`
    /// instead of landing on the other address family.
    pub fn bind(config: &ServerConfig) -> Result<Server, BindError> {
        let authority = config.authority();
        let addr = (config.hostname.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|err| BindError::new(&authority, err))?
            .next()
            .ok_or_else(|| {
                let err = io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "hostname did not resolve to any address",
                );
                BindError::new(&authority, err)
            })?;

        let listener = bind_socket(addr).map_err(|err| {
            tracing::debug!(message = "Bind failed", addr = %addr, error = %err);
            BindError::new(&authority, err)
        })?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| BindError::new(&authority, err))?;
        tracing::debug!(message = "Bound listener", addr = %local_addr);
        Ok(Server {
            listener,
            hostname: config.hostname.clone(),
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn startup_notice(&self) -> String {
        format!(
            "Server running at http://{}:{}/",
            self.hostname,
            self.local_addr.port()
        )
    }

    /// Accepts connections until the process is killed. Each connection runs
    /// in its own task.
    pub async fn serve(self) -> Result<(), ServeError> {
        let listener = TcpListener::from_std(self.listener).map_err(ServeError::Listener)?;
        tracing::info!(message = "Accepting requests.", addr = %self.local_addr);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    // EMFILE and friends clear up once other connections close
                    tracing::warn!(message = "Accept failed", error = %err);
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    continue;
                }
            };
            tracing::debug!(message = "Accepted connection", peer = %peer);
            tokio::spawn(serve_connection(stream, peer));
        }
    }
}

/// Binds `config`, prints the startup notice and serves forever.
pub async fn start(config: &ServerConfig) -> Result<(), ServeError> {
    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(message = "Could not start server", kind = ?err.kind(), error = %err);
            return Err(err.into());
        }
    };
    let notice = server.startup_notice();
    println!("{notice}");
    tracing::info!(message = %notice, addr = %server.local_addr());
    server.serve().await
}

fn bind_socket(addr: SocketAddr) -> io::Result<std::net::TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // Only lets us reuse ports in TIME_WAIT, a live listener still yields EADDRINUSE.
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    Ok(socket.into())
}

async fn serve_connection(stream: TcpStream, peer: SocketAddr) {
    let io = TokioIo::new(stream);
    let result = http1::Builder::new()
        .serve_connection(io, service_fn(response::handle))
        .await;
    match result {
        Ok(()) => tracing::debug!(message = "Closing connection", peer = %peer),
        Err(err) => tracing::debug!(message = "Connection error", peer = %peer, error = %err),
    }
}
