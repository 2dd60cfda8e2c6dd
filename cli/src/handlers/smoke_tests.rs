use clap::Parser;
use pretty_assertions::{assert_eq, assert_str_eq};
use rstest::{fixture, rstest};
use surrealdb::{Surreal, engine::local::Db};
use tyne_core::config::Settings;
use tyne_storage::{
    db::schemas::playlist::Playlist,
    test_utils::{WaxCatalog, init_test_database, wax_catalog},
};

use crate::handlers::{
    AlbumCommand, ArtistCommand, CatalogCommand, Command, CommandHandler, PlaylistCommand,
    WriteAdapter,
};

#[test]
fn test_cli_args_parse() {
    let args = vec!["tyne", "--catalog", "/tmp/catalog.db"];
    let flags = crate::Flags::try_parse_from(args);
    assert!(flags.is_ok());
    let flags = flags.unwrap();
    assert_eq!(flags.catalog, Some("/tmp/catalog.db".into()));
    assert!(flags.subcommand.is_none());
}

#[rstest]
#[case(vec!["tyne", "search", "wax"], Command::Search { term: "wax".into(), staff: false, raw: false })]
#[case(vec!["tyne", "search", "wax", "--staff", "--raw"], Command::Search { term: "wax".into(), staff: true, raw: true })]
#[case(
    vec!["tyne", "playlist", "move", "1", "2", "-1"],
    Command::Playlist { command: PlaylistCommand::Move { id: 1, song_id: 2, position: -1 } }
)]
#[case(
    vec!["tyne", "playlist", "add", "1", "2", "--position", "0"],
    Command::Playlist { command: PlaylistCommand::Add { id: 1, song_id: 2, position: Some(0) } }
)]
#[case(
    vec!["tyne", "playlist", "add", "1", "2"],
    Command::Playlist { command: PlaylistCommand::Add { id: 1, song_id: 2, position: None } }
)]
#[case(vec!["tyne", "album", "show", "3"], Command::Album { command: AlbumCommand::Show { id: 3 } })]
#[case(vec!["tyne", "artist", "list"], Command::Artist { command: ArtistCommand::List })]
#[case(
    vec!["tyne", "catalog", "export", "/tmp/tyne.surql"],
    Command::Catalog { command: CatalogCommand::Export { path: "/tmp/tyne.surql".into() } }
)]
fn test_cli_args_parse_commands(#[case] args: Vec<&str>, #[case] expected: Command) {
    let flags = crate::Flags::try_parse_from(args).unwrap();
    assert_eq!(flags.subcommand, Some(expected));
}

struct Context {
    db: Surreal<Db>,
    catalog: WaxCatalog,
    settings: Settings,
}

#[fixture]
async fn context() -> Context {
    let db = init_test_database().await.unwrap();
    let catalog = wax_catalog(&db).await.unwrap();
    Context {
        db,
        catalog,
        settings: Settings::default(),
    }
}

/// Run a command, returning what it printed on stdout and stderr.
async fn try_run(command: &Command, context: &Context) -> anyhow::Result<(String, String)> {
    let stdout = &mut WriteAdapter(Vec::new());
    let stderr = &mut WriteAdapter(Vec::new());

    command
        .handle(&context.db, &context.settings, stdout, stderr)
        .await?;

    Ok((
        String::from_utf8(stdout.0.clone())?,
        String::from_utf8(stderr.0.clone())?,
    ))
}

async fn run(command: &Command, context: &Context) -> (String, String) {
    try_run(command, context).await.unwrap()
}

fn playlist_command(command: PlaylistCommand) -> Command {
    Command::Playlist { command }
}

#[rstest]
#[tokio::test]
async fn test_search_command(#[future] context: Context) {
    let context = context.await;
    let command = Command::Search {
        term: "wax".into(),
        staff: false,
        raw: false,
    };

    let (stdout, stderr) = run(&command, &context).await;

    assert!(stderr.is_empty());
    let albums = stdout
        .split("Albums:\n")
        .nth(1)
        .and_then(|rest| rest.split("Songs:\n").next())
        .unwrap();
    let (wax, deluxe) = (
        context.catalog.wax.id.unwrap(),
        context.catalog.wax_deluxe.id.unwrap(),
    );
    assert_str_eq!(
        albums,
        format!("\t{wax}: \"WAX\"\n\t{deluxe}: \"WAX (Deluxe)\"\n")
    );
    assert!(stdout.starts_with(&format!("Top Results:\n\talbum {wax}: \"WAX\"\n")));
}

#[rstest]
#[tokio::test]
async fn test_search_command_raw(#[future] context: Context) {
    let context = context.await;
    let command = Command::Search {
        term: "wax".into(),
        staff: true,
        raw: true,
    };

    let (stdout, _) = run(&command, &context).await;

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["albums"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["top_results"][0]["item_type"], "ALBUM");
}

#[rstest]
#[tokio::test]
async fn test_search_command_no_results(#[future] context: Context) {
    let context = context.await;
    let command = Command::Search {
        term: "zzzz".into(),
        staff: true,
        raw: false,
    };

    let (stdout, _) = run(&command, &context).await;
    assert_str_eq!(stdout, "No results\n");
}

#[rstest]
#[tokio::test]
async fn test_playlist_commands(#[future] context: Context) {
    let context = context.await;
    let id = context.catalog.all_time_pop.id.unwrap();
    let timmy = context.catalog.timmy.id.unwrap();
    let slippery = context.catalog.slippery.id.unwrap();

    for song_id in [timmy, slippery] {
        let (_, stderr) = run(
            &playlist_command(PlaylistCommand::Add {
                id,
                song_id,
                position: None,
            }),
            &context,
        )
        .await;
        assert!(stderr.is_empty());
    }

    let (stdout, _) = run(
        &playlist_command(PlaylistCommand::Move {
            id,
            song_id: slippery,
            position: 0,
        }),
        &context,
    )
    .await;
    assert_str_eq!(
        stdout,
        format!("Order of <Playlist 'All Time Pop'>: {slippery},{timmy}\n")
    );

    let (stdout, stderr) = run(&playlist_command(PlaylistCommand::Show { id }), &context).await;
    assert!(stderr.is_empty());
    assert_str_eq!(
        stdout,
        format!(
            "All Time Pop (id: {id}):\n\t0: \"Slippery\" (id: {slippery}),\n\t1: \"Timmy\" (id: {timmy}),\n"
        )
    );

    let (stdout, _) = run(&playlist_command(PlaylistCommand::Verify { id }), &context).await;
    assert_str_eq!(stdout, "The order of <Playlist 'All Time Pop'> matches its songs\n");

    run(
        &playlist_command(PlaylistCommand::Remove {
            id,
            song_id: timmy,
        }),
        &context,
    )
    .await;
    let stored = Playlist::read(&context.db, id).await.unwrap().unwrap();
    assert_eq!(stored.songs, vec![slippery]);
    assert_eq!(stored.songs_order.as_slice(), &[slippery]);
}

#[rstest]
#[tokio::test]
async fn test_playlist_reset_command(#[future] context: Context) {
    let context = context.await;
    let id = context.catalog.quavo_must_listens.id.unwrap();
    let timmy = context.catalog.timmy.id.unwrap();
    let slippery = context.catalog.slippery.id.unwrap();
    tyne_storage::db::update_record(
        &context.db,
        Playlist {
            songs: vec![timmy, slippery],
            songs_order: vec![slippery, 404].into(),
            ..context.catalog.quavo_must_listens.clone()
        },
    )
    .await
    .unwrap();

    let (stdout, _) = run(&playlist_command(PlaylistCommand::Verify { id }), &context).await;
    assert_str_eq!(
        stdout,
        format!(
            "The order of <Playlist 'Quavo Must Listens'> is stale: ordered [{slippery},404], songs [{timmy},{slippery}]\n"
        )
    );

    let (_, stderr) = run(&playlist_command(PlaylistCommand::Show { id }), &context).await;
    assert!(stderr.starts_with("The order of <Playlist 'Quavo Must Listens'> is stale"));

    let (stdout, _) = run(&playlist_command(PlaylistCommand::Reset { id }), &context).await;
    assert_str_eq!(
        stdout,
        format!("Order of <Playlist 'Quavo Must Listens'>: {timmy},{slippery}\n")
    );

    let (stdout, _) = run(&playlist_command(PlaylistCommand::Verify { id }), &context).await;
    assert_str_eq!(
        stdout,
        "The order of <Playlist 'Quavo Must Listens'> matches its songs\n"
    );
}

#[rstest]
#[case::missing_playlist(PlaylistCommand::Show { id: 404 }, "Playlist 404 not found\n")]
#[case::missing_song(PlaylistCommand::Add { id: 1, song_id: 404, position: None }, "Song 404 not found\n")]
#[case::not_a_member(
    PlaylistCommand::Move { id: 1, song_id: 1, position: 0 },
    "Song 1 is not in <Playlist 'All Time Pop'>\n"
)]
#[tokio::test]
async fn test_playlist_command_errors(
    #[future] context: Context,
    #[case] command: PlaylistCommand,
    #[case] expected: &str,
) {
    let context = context.await;
    let (stdout, stderr) = run(&playlist_command(command), &context).await;

    assert!(stdout.is_empty());
    assert_str_eq!(stderr, expected);
}

#[rstest]
#[tokio::test]
async fn test_album_commands(#[future] context: Context) {
    let context = context.await;
    let deluxe = context.catalog.wax_deluxe.id.unwrap();
    let (timmy, slippery) = (
        context.catalog.timmy.id.unwrap(),
        context.catalog.slippery.id.unwrap(),
    );

    let (stdout, _) = run(
        &Command::Album {
            command: AlbumCommand::List,
        },
        &context,
    )
    .await;
    // unpublished albums are listed too
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("\"WAX Platinum Edition\""));

    let (stdout, _) = run(
        &Command::Album {
            command: AlbumCommand::Show { id: deluxe },
        },
        &context,
    )
    .await;
    assert!(stdout.starts_with(&format!("WAX (Deluxe) (id: {deluxe}, published):\n\tDisc 1")));
    assert!(stdout.ends_with(&format!(
        "\t\t1. \"Timmy\" (id: {timmy}),\n\t\t2. \"Slippery\" (id: {slippery}),\n"
    )));

    let (_, stderr) = run(
        &Command::Album {
            command: AlbumCommand::Show { id: 404 },
        },
        &context,
    )
    .await;
    assert_str_eq!(stderr, "Album 404 not found\n");
}

#[rstest]
#[tokio::test]
async fn test_artist_commands(#[future] context: Context) {
    let context = context.await;
    let quavo = context.catalog.quavo.id.unwrap();

    let (stdout, _) = run(
        &Command::Artist {
            command: ArtistCommand::List,
        },
        &context,
    )
    .await;
    assert_eq!(stdout.lines().count(), 5);

    let (stdout, _) = run(
        &Command::Artist {
            command: ArtistCommand::Show { id: quavo },
        },
        &context,
    )
    .await;
    assert_str_eq!(
        stdout,
        format!("Quavo (id: {quavo}):\n\tnicknames: \"Huncho\", \"Quavious\"\n")
    );
}

#[rstest]
#[tokio::test]
async fn test_catalog_stats(#[future] context: Context) {
    let context = context.await;
    let (stdout, _) = run(
        &Command::Catalog {
            command: CatalogCommand::Stats,
        },
        &context,
    )
    .await;

    assert_str_eq!(
        stdout,
        "album: 3\nartist: 4\ncreator: 2\ndisc: 3\ngenre: 1\nplaylist: 3\nprofile: 1\nsong: 3\n"
    );
}

#[rstest]
#[tokio::test]
async fn test_catalog_export(#[future] context: Context) {
    let context = context.await;
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("catalog.surql");

    let (stdout, _) = run(
        &Command::Catalog {
            command: CatalogCommand::Export { path: path.clone() },
        },
        &context,
    )
    .await;

    assert_str_eq!(
        stdout,
        format!("Exported the catalogue to {}\n", path.display())
    );
    let exported = std::fs::read_to_string(&path).unwrap();
    assert!(exported.contains("Quavo Must Listens"));
}

#[rstest]
#[tokio::test]
async fn test_catalog_export_reports_write_failures(#[future] context: Context) {
    let context = context.await;
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("missing").join("catalog.surql");

    let result = try_run(
        &Command::Catalog {
            command: CatalogCommand::Export { path: path.clone() },
        },
        &context,
    )
    .await;

    assert!(result.is_err());
    assert!(!path.exists());
}
