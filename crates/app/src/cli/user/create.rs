use clap::Args;
use secrecy::SecretString;
use stockroom_app::{
    auth::{PgUsersService, data::NewUser},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email, matched exactly
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "STOCKROOM_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant admin rights
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser {
            name: args.name,
            email: args.email,
            password: SecretString::from(args.password),
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}
