/// Build Script for the Bookstore service
///
/// Compiles the protocol buffer definition of the bookstore service and
/// generates both the server trait and the transport-backed client.
///
/// # Copyright
/// Copyright (c) 2025 The bookstore-grpc authors
///
/// # License
/// Licensed under the Apache License, Version 2.0.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/bookstore.proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/bookstore.proto"], &["proto"])?;
    Ok(())
}
