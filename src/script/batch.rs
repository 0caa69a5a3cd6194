use super::template::Dialect;

pub(super) static DIALECT: Dialect = Dialect {
    opening: "@echo off\n",
    comment: "REM",
    escape,
    boolean,
    variables: VARIABLES,
    prelude: PRELUDE,
    procedures: "",
    record: RECORD,
    footer: FOOTER,
};

/// cmd.exe toggles quoting on every `"`, so a literal quote is doubled to
/// keep the surrounding string balanced.
fn escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// Assigned before delayed expansion is enabled so a `!` in the token survives.
const VARIABLES: &str = r#"set "CLOUDFLARE_API_TOKEN={token}"
set "ZONE_ID={zone_id}"
"#;

const PRELUDE: &str = r#"setlocal EnableDelayedExpansion

REM Check dependencies
where curl >nul 2>nul
if errorlevel 1 (
    echo Error: curl not found. Please install curl.
    pause
    exit /b 1
)

where jq >nul 2>nul
if errorlevel 1 (
    echo Error: jq not found. Please install jq.
    pause
    exit /b 1
)

REM Get current public IP
set "IP="
for /f "delims=" %%i in ('curl -s {ip_endpoint}') do set "IP=%%i"
if "%IP%"=="" (
    echo Error: Could not get public IP
    pause
    exit /b 1
)

echo Current IP: %IP%
echo Starting DNS updates...
set "RESPONSE_FILE=%TEMP%\cloudflare-dns-update.json"
"#;

const RECORD: &str = r#"REM Record {n}: {name}
echo Updating {name}...
set "RECORD_ID_{n}="
for /f "delims=" %%i in ('curl -s -X GET "{api_base}/zones/%ZONE_ID%/dns_records?name={name}" -H "Authorization: Bearer %CLOUDFLARE_API_TOKEN%" -H "Content-Type: application/json" ^| jq -r ".result[0].id // empty"') do set "RECORD_ID_{n}=%%i"

if defined RECORD_ID_{n} (
    set "CURRENT_IP_{n}="
    for /f "delims=" %%i in ('curl -s -X GET "{api_base}/zones/%ZONE_ID%/dns_records/!RECORD_ID_{n}!" -H "Authorization: Bearer %CLOUDFLARE_API_TOKEN%" -H "Content-Type: application/json" ^| jq -r ".result.content // empty"') do set "CURRENT_IP_{n}=%%i"

    if not "!CURRENT_IP_{n}!"=="%IP%" (
        curl -s -X PUT "{api_base}/zones/%ZONE_ID%/dns_records/!RECORD_ID_{n}!" -H "Authorization: Bearer %CLOUDFLARE_API_TOKEN%" -H "Content-Type: application/json" --data "{\"type\":\"{type}\",\"name\":\"{name}\",\"content\":\"%IP%\",\"ttl\":1,\"proxied\":{proxied}}" -o "!RESPONSE_FILE!"
        set "UPDATE_OK_{n}="
        for /f "delims=" %%i in ('jq -r ".success // false" "!RESPONSE_FILE!"') do set "UPDATE_OK_{n}=%%i"
        if "!UPDATE_OK_{n}!"=="true" (
            echo Updated {name} to %IP%
        ) else (
            set "UPDATE_ERROR_{n}=Unknown error"
            for /f "delims=" %%i in ('jq -r ".errors[0].message // empty" "!RESPONSE_FILE!"') do set "UPDATE_ERROR_{n}=%%i"
            echo Failed to update {name}: !UPDATE_ERROR_{n}!
        )
        del "!RESPONSE_FILE!" >nul 2>nul
    ) else (
        echo {name} already has IP %IP%
    )
) else (
    echo DNS record not found: {name}
)
"#;

// Delayed expansion would swallow the `!` in the completion message.
const FOOTER: &str = r#"
endlocal
echo DNS update completed!
pause
"#;
