//! The Highway Star system architecture.
//!
//! A Java Swing desktop client talks to a backend server, which in turn
//! uses IP geolocation, OpenStreetMap, and a Firebase realtime database.

use trellis::{
    color::Color,
    semantic::{Diagram, DiagramBuilder, Direction, EdgeStyle, NodeKind, Splines},
};

/// Builds the Highway Star architecture diagram.
///
/// The result is the same on every call.
pub fn diagram() -> Diagram {
    DiagramBuilder::new("Highway Star Architecture")
        .filename("highway_star_arch")
        .direction(Direction::LeftRight)
        .splines(Splines::Ortho)
        .nodesep(1.0)
        .ranksep(1.5)
        .cluster("client_side", "Client Side", |client| {
            client
                .node("user", "User", NodeKind::User)
                .node("frontend", "Java Swing", NodeKind::custom("java.png"))
                .edge(
                    "user",
                    "frontend",
                    EdgeStyle::new()
                        .label("UI interactions")
                        .color(color("black")),
                );
        })
        .cluster("server_side", "Server Side", |server| {
            server.node("backend", "Backend", NodeKind::Server).edge(
                "frontend",
                "backend",
                // X11 blue4
                EdgeStyle::new().label("API calls").color(color("#00008b")),
            );
        })
        .cluster("external_services", "External Services", |external| {
            external.cluster("mapping_services", "Mapping Services", |mapping| {
                mapping
                    .node(
                        "geolocation",
                        "IP Geolocation",
                        NodeKind::custom("geolocation.png"),
                    )
                    .node("osm", "OpenStreetMap\nAPI", NodeKind::custom("osm.png"))
                    .edge(
                        "geolocation",
                        "osm",
                        EdgeStyle::new().label("Fetch context").dashed(),
                    );
            });
            external.cluster("database", "Database", |database| {
                database.node(
                    "firebase",
                    "Firebase\nRealtime\nDB",
                    NodeKind::custom("firebase.png"),
                );
            });
        })
        .edge(
            "backend",
            "geolocation",
            EdgeStyle::new()
                .label("1. Client IP lookup")
                .color(color("red")),
        )
        .edge(
            "backend",
            "osm",
            EdgeStyle::new()
                .label("2. Map data request")
                .color(color("darkgreen")),
        )
        .edge(
            "backend",
            "firebase",
            EdgeStyle::new()
                .label("3a. Store auth tokens\n3b. Activity logs")
                .color(color("purple")),
        )
        .edge(
            "osm",
            "firebase",
            EdgeStyle::new().label("4. Cache metadata").dotted(),
        )
        .build()
}

/// Icon files the diagram expects in the assets directory.
pub const ICONS: [&str; 4] = ["java.png", "geolocation.png", "osm.png", "firebase.png"];

fn color(name: &str) -> Color {
    Color::new(name).expect("edge colors are valid CSS colors")
}
